//! Shared utilities: logging setup and timing.

pub mod logger;
pub mod timer;

pub use logger::{init_logger, LogLevel};
pub use timer::Timer;
