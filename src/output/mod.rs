//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV output of a one-shot
//! scan report.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::write_csv;
pub use json_format::write_json;
pub use plain::{print_error, print_warning, write_plain};

use crate::error::CliResult;
use crate::scanner::{ForbiddenRange, PortRecord, PortStatus, ScanSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// One probed address in a report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub address: String,
    pub status: PortStatus,
    pub last_read: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_for: Option<&'static str>,
}

/// Results of a single headless scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub backend: String,
    pub start: String,
    pub end: String,
    pub scanned_at: DateTime<Utc>,
    pub duration_us: u64,
    pub ports_scanned: usize,
    pub active_ports: usize,
    pub empty_ports: usize,
    pub forbidden_ports: usize,
    pub results: Vec<ReportRow>,
}

impl ScanReport {
    pub fn new(
        backend: &str,
        summary: &ScanSummary,
        records: &[PortRecord],
        reserved: &[ForbiddenRange],
    ) -> Self {
        let results = records
            .iter()
            .map(|r| ReportRow {
                address: format!("0x{:04X}", r.address),
                status: r.status,
                last_read: format!("0x{:02X}", r.last_read),
                reserved_for: reserved
                    .iter()
                    .find(|range| range.contains(r.address))
                    .map(|range| range.label),
            })
            .collect();

        Self {
            backend: backend.to_string(),
            start: format!("0x{:04X}", summary.window.start()),
            end: format!("0x{:04X}", summary.window.end()),
            scanned_at: Utc::now(),
            duration_us: summary.elapsed.as_micros() as u64,
            ports_scanned: summary.total(),
            active_ports: summary.active,
            empty_ports: summary.empty,
            forbidden_ports: summary.forbidden,
            results,
        }
    }
}

/// Write a report in the requested format.
pub fn format_report<W: Write>(
    out: &mut W,
    report: &ScanReport,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Plain => write_plain(out, report)?,
        OutputFormat::Json => write_json(out, report)?,
        OutputFormat::Csv => write_csv(out, report)?,
    }
    Ok(())
}
