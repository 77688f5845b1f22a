//! Configuration module
//!
//! Handles loading configuration and merging it with environment variables
//! and command-line flags. Flags win over the environment, which wins over
//! the configuration file.

pub mod env;
pub mod file;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::Args;
use crate::output::OutputFormat;
use crate::utils::LogLevel;
pub use env::EnvConfig;

/// Largest parallelism accepted from any source, matching the `-n` flag
pub const MAX_PARALLELISM: usize = u32::MAX as usize;

/// Application configuration file contents
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default number of concurrent runs per command
    pub parallelism: usize,

    /// Default output format (text, json, csv)
    pub format: String,

    /// Default log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            parallelism: 1,
            format: "text".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.parallelism == 0 {
            anyhow::bail!("parallelism must be at least 1");
        }
        if self.parallelism > MAX_PARALLELISM {
            anyhow::bail!("parallelism must be at most {MAX_PARALLELISM}");
        }
        if OutputFormat::from_str(&self.format).is_none() {
            anyhow::bail!("Unknown output format: {}", self.format);
        }
        Ok(())
    }
}

/// Check if file is YAML based on extension
fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}

/// Effective settings for one run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub parallelism: usize,
    pub format: OutputFormat,
    pub log_level: LogLevel,
}

impl Settings {
    /// Merge command-line flags, environment and configuration file
    pub fn resolve(args: &Args, env: &EnvConfig) -> Result<Self> {
        let config_path = args
            .config
            .clone()
            .or_else(|| env.config_file.as_deref().map(PathBuf::from))
            .or_else(file::find);

        let config = match config_path {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                AppConfig::load(&path)?
            }
            None => AppConfig::default(),
        };

        Self::merge(args, env, &config)
    }

    fn merge(args: &Args, env: &EnvConfig, config: &AppConfig) -> Result<Self> {
        let parallelism = args
            .parallelism
            .map(|n| n as usize)
            .or(env.parallelism)
            .unwrap_or(config.parallelism);

        let format_name = args
            .format
            .as_deref()
            .or(env.format.as_deref())
            .unwrap_or(config.format.as_str());
        let format = OutputFormat::from_str(format_name)
            .with_context(|| format!("Unknown output format: {format_name}"))?;

        let log_level = if args.verbose {
            LogLevel::Debug
        } else {
            env.log_level
                .as_deref()
                .and_then(LogLevel::from_str)
                .or_else(|| LogLevel::from_str(&config.log_level))
                .unwrap_or_default()
        };

        Ok(Self {
            parallelism,
            format,
            log_level,
        })
    }
}
