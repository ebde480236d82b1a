//! Real port reads through the Linux `/dev/port` device.
//!
//! A one-byte positional read at offset N makes the kernel execute `inb`
//! on port N. Opening the device needs root (CAP_SYS_RAWIO).

use crate::error::{ScanError, ScanResult};
use crate::scanner::traits::HardwareIo;

#[cfg(target_os = "linux")]
use std::fs::File;
#[cfg(target_os = "linux")]
use std::os::unix::fs::FileExt;

/// Port reads through `/dev/port`.
///
/// # Characteristics
///
/// - **Side effects**: Real. Reading some device registers acknowledges
///   interrupts or pops FIFOs.
/// - **Privileges**: root or CAP_SYS_RAWIO
/// - **Platform**: Linux on x86
pub struct DevPort {
    #[cfg(target_os = "linux")]
    file: File,
}

impl DevPort {
    pub const PATH: &'static str = "/dev/port";

    /// Open the port device read-only.
    #[cfg(target_os = "linux")]
    pub fn open() -> ScanResult<Self> {
        let file = File::open(Self::PATH)
            .map_err(|e| ScanError::Unavailable(format!("{}: {}", Self::PATH, e)))?;
        tracing::debug!(path = Self::PATH, "opened port device");
        Ok(Self { file })
    }

    #[cfg(not(target_os = "linux"))]
    pub fn open() -> ScanResult<Self> {
        Err(ScanError::Unavailable(format!(
            "{} is only available on Linux",
            Self::PATH
        )))
    }
}

impl HardwareIo for DevPort {
    fn name(&self) -> &'static str {
        "dev-port"
    }

    fn requires_privileges(&self) -> bool {
        true
    }

    #[cfg(target_os = "linux")]
    fn read_byte(&mut self, address: u16) -> ScanResult<u8> {
        let mut byte = [0u8; 1];
        self.file
            .read_exact_at(&mut byte, u64::from(address))
            .map_err(|source| ScanError::Read { address, source })?;
        Ok(byte[0])
    }

    #[cfg(not(target_os = "linux"))]
    fn read_byte(&mut self, address: u16) -> ScanResult<u8> {
        Err(ScanError::Unavailable(format!(
            "cannot read port 0x{:04X} on this platform",
            address
        )))
    }
}

/// Check if running with root privileges.
pub fn is_root() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::geteuid() == 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}
