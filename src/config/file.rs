//! Configuration file discovery
//!
//! Finds the configuration file in the standard locations.

use std::path::PathBuf;

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./parallel.yaml",
    "./parallel.yml",
    "./.parallel.yaml",
    "~/.config/parallel/config.yaml",
];

/// Find configuration file in standard locations
pub fn find() -> Option<PathBuf> {
    CONFIG_LOCATIONS
        .iter()
        .map(|location| expand_path(location))
        .find(|path| path.exists())
}

/// Expand ~ to home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
