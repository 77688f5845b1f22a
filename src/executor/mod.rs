//! Command execution engine
//!
//! Tokenizes commands, runs them as child processes, and fans the
//! invocations out in parallel.

mod parallel;
mod runner;
mod tokenizer;

pub use parallel::Dispatcher;
pub use runner::InvokeError;
