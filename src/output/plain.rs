//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::output::ScanReport;
use crate::scanner::PortStatus;
use console::style;
use std::io::{self, Write};

const RULE: &str = "═══════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────";

/// Write the report in human-readable form. Only active ports are listed.
pub fn write_plain<W: Write>(out: &mut W, report: &ScanReport) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(
        out,
        "                    {} Port Scan Results",
        style("ioprobe").cyan().bold()
    )?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    writeln!(out, "  {} {}", style("Backend:").bold(), report.backend)?;
    writeln!(
        out,
        "  {} {} - {}",
        style("Window:").bold(),
        report.start,
        report.end
    )?;
    writeln!(
        out,
        "  {} {}",
        style("Scanned:").bold(),
        style(report.scanned_at.to_rfc3339()).dim()
    )?;
    writeln!(out)?;

    writeln!(
        out,
        "  {} {} ports in {:.2}ms",
        style("Statistics:").bold(),
        report.ports_scanned,
        report.duration_us as f64 / 1000.0
    )?;
    writeln!(
        out,
        "              {} active, {} empty, {} forbidden",
        style(report.active_ports).green().bold(),
        style(report.empty_ports).dim(),
        style(report.forbidden_ports).red()
    )?;
    writeln!(out)?;

    let active: Vec<_> = report
        .results
        .iter()
        .filter(|r| r.status == PortStatus::Active)
        .collect();

    if active.is_empty() {
        writeln!(out, "  {}", style("No active ports found.").dim())?;
    } else {
        writeln!(out, "  {}", style(THIN_RULE).dim())?;
        writeln!(
            out,
            "  {:<8}  {:<6}  {}",
            style("PORT").bold(),
            style("VALUE").bold(),
            style("STATE").bold()
        )?;
        writeln!(out, "  {}", style(THIN_RULE).dim())?;
        for row in active {
            writeln!(
                out,
                "  {:<8}  {:<6}  {}",
                row.address,
                row.last_read,
                style(row.status).green().bold()
            )?;
        }
        writeln!(out, "  {}", style(THIN_RULE).dim())?;
    }

    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;
    Ok(())
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}
