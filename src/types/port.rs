//! I/O port window and hex helpers.
//!
//! `PortWindow` is an inclusive `[start, end]` range that is never inverted.
//! The hex helpers are the only place port numbers are turned into text and
//! back.

use crate::error::{ScanError, ScanResult};
use std::fmt;
use std::str::FromStr;

/// Format a port address as exactly four upper-case hex digits.
#[inline]
pub fn format_hex4(value: u16) -> String {
    format!("{:04X}", value)
}

/// Parse a hex string (optional `0x` prefix, either case) into a `u16`.
///
/// Returns `None` for empty input, non-hex characters or values above `0xFFFF`.
pub fn parse_hex(text: &str) -> Option<u16> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16).ok()
}

/// An inclusive range of I/O port addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortWindow {
    start: u16,
    end: u16,
}

impl PortWindow {
    /// The window scanned when nothing else is configured.
    pub const DEFAULT: Self = Self {
        start: 0x000,
        end: 0x3FF,
    };

    /// Create a new window, rejecting `start > end`.
    pub fn new(start: u16, end: u16) -> ScanResult<Self> {
        if start > end {
            Err(ScanError::InvalidRange { start, end })
        } else {
            Ok(Self { start, end })
        }
    }

    #[inline]
    pub const fn start(&self) -> u16 {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> u16 {
        self.end
    }

    /// Number of addresses covered (always at least one).
    pub const fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// A valid window is never empty.
    pub const fn is_empty(&self) -> bool {
        false
    }

    pub const fn contains(&self, address: u16) -> bool {
        address >= self.start && address <= self.end
    }

    /// Iterate over every address in the window.
    pub fn iter(&self) -> impl Iterator<Item = u16> {
        self.start..=self.end
    }
}

impl Default for PortWindow {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PortWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X} - 0x{:04X}", self.start, self.end)
    }
}

/// Parses `"SSSS-EEEE"` in hex, each side with an optional `0x` prefix.
impl FromStr for PortWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| format!("expected START-END, got '{}'", s))?;
        let start = parse_hex(start).ok_or_else(|| format!("invalid hex port: {}", start))?;
        let end = parse_hex(end).ok_or_else(|| format!("invalid hex port: {}", end))?;
        Self::new(start, end).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip_all_values() {
        for n in 0..=u16::MAX {
            let text = format_hex4(n);
            assert_eq!(text.len(), 4);
            assert_eq!(parse_hex(&text), Some(n));
        }
    }

    #[test]
    fn test_format_is_upper_case() {
        assert_eq!(format_hex4(0x3fa), "03FA");
        assert_eq!(format_hex4(0), "0000");
    }

    #[test]
    fn test_parse_hex_variants() {
        assert_eq!(parse_hex("03ff"), Some(0x3FF));
        assert_eq!(parse_hex("0x300"), Some(0x300));
        assert_eq!(parse_hex("0X1F"), Some(0x1F));
        assert_eq!(parse_hex(""), None);
        assert_eq!(parse_hex("0x"), None);
        assert_eq!(parse_hex("12G4"), None);
        assert_eq!(parse_hex("10000"), None);
    }

    #[test]
    fn test_window_validation() {
        let window = PortWindow::new(0x3F8, 0x3FF).unwrap();
        assert_eq!(window.len(), 8);
        assert!(window.contains(0x3F8));
        assert!(!window.contains(0x3F7));

        assert!(matches!(
            PortWindow::new(0x10, 0x0F),
            Err(ScanError::InvalidRange {
                start: 0x10,
                end: 0x0F
            })
        ));
    }

    #[test]
    fn test_full_address_space_len() {
        let window = PortWindow::new(0, u16::MAX).unwrap();
        assert_eq!(window.len(), 65536);
        assert_eq!(window.iter().count(), 65536);
    }

    #[test]
    fn test_window_parsing() {
        let window: PortWindow = "0x300-0x31F".parse().unwrap();
        assert_eq!(window, PortWindow::new(0x300, 0x31F).unwrap());
        assert!("031F-0300".parse::<PortWindow>().is_err());
        assert!("0300".parse::<PortWindow>().is_err());
    }
}
