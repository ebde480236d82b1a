//! Error types for ioprobe.
//!
//! Uses `thiserror` for ergonomic error definitions.

use thiserror::Error;

/// Main error type for scanning operations.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("invalid scan range: start 0x{start:04X} > end 0x{end:04X}")]
    InvalidRange { start: u16, end: u16 },

    #[error(
        "scan range 0x{start:04X}-0x{end:04X} spans {span} ports, buffer holds {capacity}"
    )]
    RangeTooLarge {
        start: u16,
        end: u16,
        span: usize,
        capacity: usize,
    },

    #[error("read failed at port 0x{address:04X}: {source}")]
    Read {
        address: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("hardware access unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while building runtime settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid grid geometry: {0}")]
    InvalidGrid(String),
}

/// Top-level error for the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type alias for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for the front end.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_error_messages() {
        let err = ScanError::InvalidRange {
            start: 0x300,
            end: 0x2FF,
        };
        assert_eq!(
            err.to_string(),
            "invalid scan range: start 0x0300 > end 0x02FF"
        );

        let err = ScanError::RangeTooLarge {
            start: 0,
            end: 0x7FF,
            span: 2048,
            capacity: 1024,
        };
        assert_eq!(
            err.to_string(),
            "scan range 0x0000-0x07FF spans 2048 ports, buffer holds 1024"
        );
    }

    #[test]
    fn test_cli_error_is_transparent_for_scans() {
        let err: CliError = ScanError::Unavailable("no /dev/port".into()).into();
        assert_eq!(err.to_string(), "hardware access unavailable: no /dev/port");
    }
}
