//! Data models for command invocation
//!
//! This module contains the data structures shared by the executor,
//! the aggregator and the output formatters.

mod invocation;

pub use invocation::{
    CommandSpec, InvocationResult, EXIT_CANCELED, EXIT_CANNOT_INVOKE, EXIT_ENOENT, EXIT_USAGE,
};
