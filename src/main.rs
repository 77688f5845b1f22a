//! parallel - run commands concurrently and measure their latency
//!
//! Every command is started `-n` times at once, each run as its own child
//! process. Once all of them have exited, the tool prints the minimum,
//! average and maximum wall-clock latency of the runs.
//!
//! ## Usage
//!
//! ```bash
//! # Run one command ten times in parallel
//! parallel -n 10 'curl -s http://localhost:8080/health'
//!
//! # Quoted arguments stay together
//! parallel 'sh -c "sleep 0.1"' 'echo hello'
//!
//! # Raw samples as CSV
//! parallel -n 5 --format csv 'true'
//! ```
//!
//! ## Exit status
//!
//! - `0` when every invocation was launched and waited for
//! - `1` on usage or configuration errors
//! - `125` when a process could not be created or waited for

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::info;

mod benchmark;
mod cli;
mod config;
mod executor;
mod models;
mod output;
mod utils;

use cli::Args;
use config::{EnvConfig, Settings};
use executor::{Dispatcher, InvokeError};
use models::{CommandSpec, EXIT_CANCELED, EXIT_USAGE};
use output::{ResultFormatter, RunReport};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let settings = match Settings::resolve(&args, &EnvConfig::load()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Invalid configuration: {err:#}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    utils::init_logger(settings.log_level);

    match run(args.commands, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(exit_status(&err))
        }
    }
}

/// Process exit status for an error that ended the run
fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<InvokeError>() {
        Some(_) => EXIT_CANCELED,
        None => EXIT_USAGE,
    }
}

async fn run(commands: Vec<String>, settings: &Settings) -> Result<()> {
    let commands: Vec<CommandSpec> = commands.into_iter().map(CommandSpec::from).collect();
    let dispatcher = Dispatcher::new(settings.parallelism);

    let results = dispatcher.run(&commands).await?;

    let stats = benchmark::summarize(&results);
    let clean = results.iter().filter(|r| r.exited_cleanly()).count();
    info!("{}; {} exited with status 0", stats.format_summary(), clean);

    let report = RunReport {
        commands: &commands,
        parallelism: settings.parallelism,
        results: &results,
        stats,
    };
    let rendered = ResultFormatter::new(settings.format).format_report(&report)?;
    print!("{rendered}");

    Ok(())
}
