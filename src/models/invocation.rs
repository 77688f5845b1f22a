//! Invocation models
//!
//! Defines command specs, per-invocation results, and the exit statuses
//! used when a program cannot be run.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Usage or configuration error.
pub const EXIT_USAGE: u8 = 1;
/// Internal error prior to exec attempt (spawn or wait failure).
pub const EXIT_CANCELED: u8 = 125;
/// Program located, but not usable.
pub const EXIT_CANNOT_INVOKE: i32 = 126;
/// Could not find program to exec.
pub const EXIT_ENOENT: i32 = 127;

/// A caller-supplied command string, shared read-only between tasks
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommandSpec(Arc<str>);

impl CommandSpec {
    pub fn new(command: impl AsRef<str>) -> Self {
        Self(Arc::from(command.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CommandSpec {
    fn from(command: &str) -> Self {
        Self::new(command)
    }
}

impl From<String> for CommandSpec {
    fn from(command: String) -> Self {
        Self(Arc::from(command))
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one spawn-and-wait cycle
///
/// `success` means the child was launched and waited for. The child's own
/// exit status lives in `exit_code` and never affects `success`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InvocationResult {
    pub success: bool,
    /// Wall-clock latency, microsecond resolution
    pub elapsed: Duration,
    /// Child exit status; `None` if it was killed by a signal or never ran
    pub exit_code: Option<i32>,
}

impl InvocationResult {
    /// Record a completed invocation
    pub fn completed(elapsed: Duration, exit_code: Option<i32>) -> Self {
        Self {
            success: true,
            elapsed: Duration::from_micros(elapsed.as_micros() as u64),
            exit_code,
        }
    }

    /// Elapsed time in fractional milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_micros() as f64 / 1000.0
    }

    /// True if the child ran and exited zero
    pub fn exited_cleanly(&self) -> bool {
        self.success && self.exit_code == Some(0)
    }
}

impl fmt::Display for InvocationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self.exit_code {
            Some(code) => code.to_string(),
            None => "-".to_string(),
        };
        write!(
            f,
            "{} exit={} [{}ms]",
            if self.success { "ok" } else { "pending" },
            status,
            self.elapsed_ms()
        )
    }
}
