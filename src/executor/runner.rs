//! Command invocation
//!
//! Spawns one process for one command, waits for it, and records how long
//! the round trip took.

use std::io;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use super::tokenizer::tokenize;
use crate::models::{CommandSpec, InvocationResult, EXIT_CANNOT_INVOKE, EXIT_ENOENT};
use crate::utils::Timer;

/// Errors that abort the whole run
#[derive(Error, Debug)]
pub enum InvokeError {
    #[error("Cannot fork for '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed waiting for '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Cannot schedule {commands} command(s) x {parallelism}: too many invocations")]
    TooManyTasks { commands: usize, parallelism: usize },

    #[error("Invocation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Run one command to completion.
///
/// A program that cannot be found or executed is not an error: a diagnostic
/// goes to stderr and the result carries exit status 127 or 126. Only OS
/// failures to create or wait for a process are returned as errors.
pub async fn invoke(command: &CommandSpec) -> Result<InvocationResult, InvokeError> {
    let timer = Timer::start(command.as_str());
    let argv = tokenize(command.as_str());

    let spawned = match argv.split_first() {
        Some((program, args)) => Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn(),
        None => Err(io::Error::new(io::ErrorKind::NotFound, "empty command")),
    };

    let mut child = match spawned {
        Ok(child) => child,
        Err(source) => {
            let Some(status) = exec_failure_status(&source) else {
                return Err(InvokeError::Spawn {
                    command: command.to_string(),
                    source,
                });
            };
            eprintln!("Cannot run '{command}': {source}");
            debug!("'{}' could not be executed (exit {})", command, status);
            return Ok(InvocationResult::completed(timer.stop(), Some(status)));
        }
    };

    debug!("Spawned '{}' as pid {:?}", command, child.id());

    let status = child.wait().await.map_err(|source| InvokeError::Wait {
        command: command.to_string(),
        source,
    })?;

    debug!("'{}' exited with {}", command, status);

    Ok(InvocationResult::completed(timer.stop(), status.code()))
}

/// Exit status for a program that could not be executed, or `None` when the
/// failure came from process creation itself.
fn exec_failure_status(err: &io::Error) -> Option<i32> {
    match err.kind() {
        io::ErrorKind::NotFound => Some(EXIT_ENOENT),
        io::ErrorKind::WouldBlock | io::ErrorKind::OutOfMemory => None,
        _ => Some(EXIT_CANNOT_INVOKE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_invoke_true() {
        let result = invoke(&CommandSpec::from("true")).await.unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
    }

    #[tokio::test]
    async fn test_nonzero_exit_counts_as_success() {
        let result = invoke(&CommandSpec::from("sh -c \"exit 3\"")).await.unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[tokio::test]
    async fn test_missing_program_reports_enoent() {
        let result = invoke(&CommandSpec::from("/nonexistent/binary"))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, Some(EXIT_ENOENT));
    }

    #[tokio::test]
    async fn test_blank_command_reports_enoent() {
        let result = invoke(&CommandSpec::from("   ")).await.unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, Some(EXIT_ENOENT));
    }

    #[tokio::test]
    async fn test_non_executable_reports_cannot_invoke() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "#!/bin/sh").unwrap();
        let command = CommandSpec::new(file.path().to_string_lossy());

        let result = invoke(&command).await.unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, Some(EXIT_CANNOT_INVOKE));
    }

    #[test]
    fn test_exec_failure_status() {
        let not_found = io::Error::from(io::ErrorKind::NotFound);
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        let exhausted = io::Error::from(io::ErrorKind::WouldBlock);
        assert_eq!(exec_failure_status(&not_found), Some(EXIT_ENOENT));
        assert_eq!(exec_failure_status(&denied), Some(EXIT_CANNOT_INVOKE));
        assert_eq!(exec_failure_status(&exhausted), None);
    }

    #[test]
    fn test_wait_error_message_names_command() {
        let err = InvokeError::Wait {
            command: "sleep 1".to_string(),
            source: io::Error::from(io::ErrorKind::Interrupted),
        };
        assert!(err.to_string().starts_with("Failed waiting for 'sleep 1': "));
    }
}
