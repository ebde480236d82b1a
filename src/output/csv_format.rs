//! CSV output formatting.

use crate::output::ScanReport;
use std::io::Write;

/// Write one row per probed address.
pub fn write_csv<W: Write>(out: &mut W, report: &ScanReport) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(["address", "status", "last_read", "reserved_for"])?;

    for row in &report.results {
        let status = row.status.to_string();
        wtr.write_record([
            row.address.as_str(),
            status.as_str(),
            row.last_read.as_str(),
            row.reserved_for.unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::sample_report;

    #[test]
    fn test_csv_rows() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &sample_report()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "address,status,last_read,reserved_for");
        assert_eq!(lines[1], "0x03E8,active,0x12,");
        assert_eq!(lines[9], "0x03F0,forbidden,0x00,Floppy Primary");
        assert_eq!(lines.len(), 19);
    }
}
