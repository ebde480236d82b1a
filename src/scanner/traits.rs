//! Hardware access trait and scan record types.
//!
//! `HardwareIo` abstracts the raw byte read so that the classifier can run
//! against real hardware or a scripted bus interchangeably.

use crate::error::ScanResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a probed I/O port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    /// Not scanned yet.
    #[default]
    Unknown,
    /// Read back 0xFF, the floating-bus signature.
    Empty,
    /// Read back anything else.
    Active,
    /// Reserved for system hardware; never read.
    Forbidden,
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Empty => write!(f, "empty"),
            Self::Active => write!(f, "active"),
            Self::Forbidden => write!(f, "forbidden"),
        }
    }
}

/// Result of probing a single address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PortRecord {
    /// The port address that was probed.
    pub address: u16,
    /// Classification outcome.
    pub status: PortStatus,
    /// Byte returned by the read, 0 when no read was performed.
    pub last_read: u8,
}

impl PortRecord {
    pub const fn new(address: u16, status: PortStatus, last_read: u8) -> Self {
        Self {
            address,
            status,
            last_read,
        }
    }
}

/// Trait for raw port read implementations.
///
/// Every call is a fresh observation of the hardware and may have side
/// effects on the device behind the address. Callers must only read
/// addresses they are allowed to touch.
///
/// # Example
///
/// ```ignore
/// use ioprobe::scanner::{HardwareIo, SimulatedBus};
///
/// let mut bus = SimulatedBus::new().with_byte(0x300, 0x42);
/// assert_eq!(bus.read_byte(0x300)?, 0x42);
/// ```
pub trait HardwareIo {
    /// Short backend name shown in reports and on the settings screen.
    fn name(&self) -> &'static str;

    /// Check if this backend needs elevated privileges.
    fn requires_privileges(&self) -> bool {
        false
    }

    /// Read one byte from `address`.
    fn read_byte(&mut self, address: u16) -> ScanResult<u8>;
}

impl<T: HardwareIo + ?Sized> HardwareIo for &mut T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn requires_privileges(&self) -> bool {
        (**self).requires_privileges()
    }

    fn read_byte(&mut self, address: u16) -> ScanResult<u8> {
        (**self).read_byte(address)
    }
}

impl<T: HardwareIo + ?Sized> HardwareIo for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn requires_privileges(&self) -> bool {
        (**self).requires_privileges()
    }

    fn read_byte(&mut self, address: u16) -> ScanResult<u8> {
        (**self).read_byte(address)
    }
}

/// A boxed backend for dynamic dispatch.
pub type BoxedIo = Box<dyn HardwareIo>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_status_display() {
        assert_eq!(PortStatus::Unknown.to_string(), "unknown");
        assert_eq!(PortStatus::Empty.to_string(), "empty");
        assert_eq!(PortStatus::Active.to_string(), "active");
        assert_eq!(PortStatus::Forbidden.to_string(), "forbidden");
    }

    #[test]
    fn test_default_record_is_unknown() {
        let record = PortRecord::default();
        assert_eq!(record.status, PortStatus::Unknown);
        assert_eq!(record.last_read, 0);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&PortStatus::Forbidden).unwrap();
        assert_eq!(json, "\"forbidden\"");
    }
}
