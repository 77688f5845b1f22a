//! Latency measurement module
//!
//! Aggregates per-invocation timings into run statistics.

mod metrics;

pub use metrics::{summarize, StatsSummary, SummaryMs};
