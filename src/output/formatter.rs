//! Output formatters for run reports
//!
//! Provides the plain Min/Avg/Max text report, JSON, and per-invocation CSV.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::benchmark::{StatsSummary, SummaryMs};
use crate::models::{CommandSpec, InvocationResult};

/// Output format options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "csv" => Some(OutputFormat::Csv),
            _ => None,
        }
    }
}

/// Everything known about a finished run
pub struct RunReport<'a> {
    pub commands: &'a [CommandSpec],
    pub parallelism: usize,
    pub results: &'a [InvocationResult],
    pub stats: StatsSummary,
}

impl RunReport<'_> {
    /// Command that produced the result in `slot`
    fn command_for(&self, slot: usize) -> Option<&CommandSpec> {
        self.commands.get(slot / self.parallelism.max(1))
    }

    fn samples(&self) -> Vec<Sample<'_>> {
        self.results
            .iter()
            .enumerate()
            .map(|(index, result)| Sample {
                index,
                command: self.command_for(index).map(CommandSpec::as_str).unwrap_or(""),
                success: result.success,
                elapsed_ms: result.elapsed_ms(),
                exit_code: result.exit_code,
            })
            .collect()
    }
}

#[derive(Serialize)]
struct Sample<'a> {
    index: usize,
    command: &'a str,
    success: bool,
    elapsed_ms: f64,
    exit_code: Option<i32>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    summary: SummaryMs,
    invocations: Vec<Sample<'a>>,
}

/// Report formatter
pub struct ResultFormatter {
    format: OutputFormat,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format a finished run
    pub fn format_report(&self, report: &RunReport<'_>) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(self.format_text(&report.stats)),
            OutputFormat::Json => self.format_json(report),
            OutputFormat::Csv => self.format_csv(report),
        }
    }

    /// Shortest exact rendering: no trailing zeros, no rounding of the average
    fn format_text(&self, stats: &StatsSummary) -> String {
        format!(
            "Min: {}ms\nAvg: {}ms\nMax: {}ms\n",
            stats.min_ms(),
            stats.avg_ms(),
            stats.max_ms()
        )
    }

    fn format_json(&self, report: &RunReport<'_>) -> Result<String> {
        let json = JsonReport {
            summary: SummaryMs::from(&report.stats),
            invocations: report.samples(),
        };
        let mut output =
            serde_json::to_string_pretty(&json).context("Failed to serialize JSON report")?;
        output.push('\n');
        Ok(output)
    }

    fn format_csv(&self, report: &RunReport<'_>) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for sample in report.samples() {
            writer
                .serialize(sample)
                .context("Failed to write CSV row")?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))?;
        String::from_utf8(bytes).context("CSV output is not valid UTF-8")
    }
}
