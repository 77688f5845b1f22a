//! Latency statistics
//!
//! Reduces invocation results to min/avg/max latency over the invocations
//! that completed.

use serde::Serialize;
use std::time::Duration;

use crate::models::InvocationResult;

/// Latency summary over successful invocations
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatsSummary {
    pub min: Duration,
    pub avg: Duration,
    pub max: Duration,
    /// Invocations that were launched and waited for
    pub successes: usize,
    /// All invocations, successful or not
    pub total: usize,
}

impl StatsSummary {
    /// Summarize a set of invocation results.
    ///
    /// With no successful invocations every latency is zero.
    pub fn from_results(results: &[InvocationResult]) -> Self {
        let mut successes = results.iter().filter(|r| r.success).map(|r| r.elapsed);

        let Some(first) = successes.next() else {
            return Self {
                total: results.len(),
                ..Self::default()
            };
        };

        let (mut min, mut max, mut sum, mut count) = (first, first, first.as_nanos(), 1u128);
        for elapsed in successes {
            min = min.min(elapsed);
            max = max.max(elapsed);
            sum += elapsed.as_nanos();
            count += 1;
        }

        Self {
            min,
            avg: Duration::from_nanos((sum / count) as u64),
            max,
            successes: count as usize,
            total: results.len(),
        }
    }

    pub fn min_ms(&self) -> f64 {
        as_ms(self.min)
    }

    pub fn avg_ms(&self) -> f64 {
        as_ms(self.avg)
    }

    pub fn max_ms(&self) -> f64 {
        as_ms(self.max)
    }

    /// Format as summary string
    pub fn format_summary(&self) -> String {
        format!(
            "min={}ms avg={}ms max={}ms ({}/{} completed)",
            self.min_ms(),
            self.avg_ms(),
            self.max_ms(),
            self.successes,
            self.total
        )
    }
}

/// Summarize invocation results
pub fn summarize(results: &[InvocationResult]) -> StatsSummary {
    StatsSummary::from_results(results)
}

fn as_ms(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

/// Millisecond view of a summary, used by the JSON report
#[derive(Clone, Debug, Serialize)]
pub struct SummaryMs {
    pub min_ms: f64,
    pub avg_ms: f64,
    pub max_ms: f64,
    pub successes: usize,
    pub total: usize,
}

impl From<&StatsSummary> for SummaryMs {
    fn from(stats: &StatsSummary) -> Self {
        Self {
            min_ms: stats.min_ms(),
            avg_ms: stats.avg_ms(),
            max_ms: stats.max_ms(),
            successes: stats.successes,
            total: stats.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(ms: u64) -> InvocationResult {
        InvocationResult::completed(Duration::from_millis(ms), Some(0))
    }

    #[test]
    fn test_empty_is_zero() {
        let stats = summarize(&[]);
        assert_eq!(stats.min_ms(), 0.0);
        assert_eq!(stats.avg_ms(), 0.0);
        assert_eq!(stats.max_ms(), 0.0);
        assert_eq!(stats.successes, 0);
    }

    #[test]
    fn test_no_successes_is_zero() {
        let results = vec![InvocationResult::default(); 3];
        let stats = summarize(&results);
        assert_eq!(stats.avg, Duration::ZERO);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.successes, 0);
    }

    #[test]
    fn test_min_avg_max() {
        let stats = summarize(&[ok(10), ok(20), ok(30)]);
        assert_eq!(stats.min_ms(), 10.0);
        assert_eq!(stats.avg_ms(), 20.0);
        assert_eq!(stats.max_ms(), 30.0);
        assert_eq!(stats.successes, 3);
    }

    #[test]
    fn test_unsuccessful_slots_are_ignored() {
        let results = vec![ok(5), InvocationResult::default(), ok(15)];
        let stats = summarize(&results);
        assert_eq!(stats.min, Duration::from_millis(5));
        assert_eq!(stats.avg, Duration::from_millis(10));
        assert_eq!(stats.successes, 2);
        assert_eq!(stats.total, 3);
    }

    #[test]
    fn test_fractional_milliseconds() {
        let results = vec![
            InvocationResult::completed(Duration::from_micros(1_500), Some(0)),
            InvocationResult::completed(Duration::from_micros(1_001), Some(0)),
        ];
        let stats = summarize(&results);
        assert_eq!(stats.min_ms(), 1.001);
        assert_eq!(stats.max_ms(), 1.5);
        assert_eq!(stats.avg_ms(), 1.2505);
    }

    #[test]
    fn test_summary_ms_view() {
        let view = SummaryMs::from(&summarize(&[ok(2), ok(4)]));
        assert_eq!(view.avg_ms, 3.0);
        assert_eq!(view.total, 2);
    }
}
