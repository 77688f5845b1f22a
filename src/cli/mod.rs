//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::Parser;
use std::path::PathBuf;

const QUOTING_HELP: &str = "\
Each command is broken down by spaces and double quoted (\") strings are treated as a single argument.
To escape a double quote, use two double quotes (\"\").
To escape a single quote, use '\\''.

Examples:
  parallel -n 10 'curl -s http://localhost:8080/health'
  parallel 'sh -c \"sleep 0.1\"' 'echo hello'";

/// Run commands in parallel and report their latency
#[derive(Parser, Debug)]
#[command(name = "parallel")]
#[command(version)]
#[command(about = "Run commands in parallel and report min/avg/max latency")]
#[command(after_help = QUOTING_HELP)]
pub struct Args {
    /// Commands to run, one argument per command
    #[arg(required = true, value_name = "COMMAND")]
    pub commands: Vec<String>,

    /// Parallelism count: how many times each command runs concurrently
    #[arg(
        short = 'n',
        long = "n",
        value_name = "COUNT",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub parallelism: Option<u32>,

    /// Output format (text, json, csv)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Configuration file (YAML or JSON)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("parallel").chain(argv.iter().copied()))
    }

    #[test]
    fn test_commands_and_short_n() {
        let args = parse(&["-n", "3", "echo hello", "true"]).unwrap();
        assert_eq!(args.parallelism, Some(3));
        assert_eq!(args.commands, vec!["echo hello", "true"]);
    }

    #[test]
    fn test_long_n() {
        let args = parse(&["true", "--n", "5"]).unwrap();
        assert_eq!(args.parallelism, Some(5));
    }

    #[test]
    fn test_parallelism_defaults_to_unset() {
        let args = parse(&["true"]).unwrap();
        assert_eq!(args.parallelism, None);
        assert!(!args.verbose);
    }

    #[test]
    fn test_usage_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["true", "-n"]).is_err());
        assert!(parse(&["-n", "abc", "true"]).is_err());
        assert!(parse(&["-n", "0", "true"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
