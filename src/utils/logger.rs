//! Diagnostics for the dispatcher
//!
//! Tracing output shares stderr with the `Cannot run` lines, so the default
//! filter only lets warnings through and the report on stdout stays clean.
//! Only events from this crate are shown; tokio and friends stay silent.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Verbosity chosen by `--verbose`, `PARALLEL_LOG` or the config file
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    fn level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }

    fn filter_directive(self) -> String {
        format!("{}={}", env!("CARGO_PKG_NAME"), self.level())
    }
}

/// Install the stderr subscriber. A second call keeps the first subscriber.
pub fn init_logger(level: LogLevel) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level.filter_directive()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .try_init();

    if installed.is_err() {
        tracing::debug!("Logger already installed; keeping existing subscriber");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_names() {
        assert_eq!(LogLevel::from_str("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_str(" DEBUG "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str("verbose"), None);
    }

    #[test]
    fn test_filter_is_scoped_to_this_crate() {
        assert_eq!(LogLevel::Debug.filter_directive(), "parallel=DEBUG");
        assert_eq!(LogLevel::default().filter_directive(), "parallel=WARN");
    }

    #[test]
    fn test_repeated_init_does_not_panic() {
        init_logger(LogLevel::Error);
        init_logger(LogLevel::Trace);
    }
}
