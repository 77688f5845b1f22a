//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

use super::MAX_PARALLELISM;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "PARALLEL";

/// Configuration read from `PARALLEL_*` environment variables
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvConfig {
    /// Parallelism from PARALLEL_N
    pub parallelism: Option<usize>,
    /// Output format from PARALLEL_FORMAT
    pub format: Option<String>,
    /// Log level from PARALLEL_LOG
    pub log_level: Option<String>,
    /// Config file from PARALLEL_CONFIG
    pub config_file: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(&format!("{ENV_PREFIX}_{name}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            parallelism: get("N")
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|n| (1..=MAX_PARALLELISM).contains(n)),
            format: get("FORMAT"),
            log_level: get("LOG"),
            config_file: get("CONFIG"),
        }
    }
}
