//! Output formatting module
//!
//! Renders run reports as text, JSON or CSV.

mod formatter;

pub use formatter::{OutputFormat, ResultFormatter, RunReport};
