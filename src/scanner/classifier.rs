//! Per-address classification with the reserved-range safety check.

use crate::error::ScanResult;
use crate::scanner::traits::{HardwareIo, PortStatus};
use tracing::trace;

/// Byte returned by an unpopulated ISA bus.
///
/// The data lines float high when nothing drives them, so on this platform
/// family 0xFF usually means "no device". A device may legitimately return
/// 0xFF, so this is a heuristic and not a guarantee.
pub const FLOATING_BUS: u8 = 0xFF;

/// An inclusive address range that must never be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForbiddenRange {
    pub start: u16,
    pub end: u16,
    pub label: &'static str,
}

impl ForbiddenRange {
    pub const fn new(start: u16, end: u16, label: &'static str) -> Self {
        Self { start, end, label }
    }

    #[inline]
    pub const fn contains(&self, address: u16) -> bool {
        address >= self.start && address <= self.end
    }
}

/// System-critical ports excluded from probing.
pub const FORBIDDEN_RANGES: &[ForbiddenRange] = &[
    ForbiddenRange::new(0x000, 0x01F, "DMA Controller"),
    ForbiddenRange::new(0x020, 0x021, "PIC Master"),
    ForbiddenRange::new(0x040, 0x043, "PIT Timer"),
    ForbiddenRange::new(0x060, 0x064, "Keyboard"),
    ForbiddenRange::new(0x070, 0x071, "RTC/CMOS"),
    ForbiddenRange::new(0x080, 0x09F, "DMA Page"),
    ForbiddenRange::new(0x0A0, 0x0A1, "PIC Slave"),
    ForbiddenRange::new(0x0C0, 0x0DF, "DMA #2"),
    ForbiddenRange::new(0x0F0, 0x0FF, "FPU"),
    ForbiddenRange::new(0x170, 0x177, "IDE Secondary"),
    ForbiddenRange::new(0x1F0, 0x1F7, "IDE Primary"),
    ForbiddenRange::new(0x370, 0x377, "Floppy Secondary"),
    ForbiddenRange::new(0x378, 0x37F, "COM2"),
    ForbiddenRange::new(0x3B0, 0x3BF, "MDA/Hercules"),
    ForbiddenRange::new(0x3C0, 0x3CF, "VGA"),
    ForbiddenRange::new(0x3D0, 0x3DF, "CGA/VGA"),
    ForbiddenRange::new(0x3F0, 0x3F7, "Floppy Primary"),
    ForbiddenRange::new(0x3F8, 0x3FF, "COM1"),
];

/// Decides the status of one address.
///
/// Addresses inside a forbidden range are reported without touching the
/// hardware. Everything else costs exactly one read.
pub struct PortClassifier<I> {
    io: I,
    ranges: Vec<ForbiddenRange>,
}

impl<I: HardwareIo> PortClassifier<I> {
    /// Create a classifier guarding the built-in [`FORBIDDEN_RANGES`].
    pub fn new(io: I) -> Self {
        Self::with_ranges(io, FORBIDDEN_RANGES.to_vec())
    }

    /// Create a classifier with a custom forbidden table.
    ///
    /// Ranges may overlap and need not be sorted; the first match wins.
    pub fn with_ranges(io: I, ranges: Vec<ForbiddenRange>) -> Self {
        Self { io, ranges }
    }

    /// The first forbidden range containing `address`, if any.
    pub fn forbidden(&self, address: u16) -> Option<&ForbiddenRange> {
        self.ranges.iter().find(|r| r.contains(address))
    }

    pub fn ranges(&self) -> &[ForbiddenRange] {
        &self.ranges
    }

    pub fn io(&self) -> &I {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut I {
        &mut self.io
    }

    /// Classify `address`, returning the status and the byte read (0 if none).
    pub fn classify(&mut self, address: u16) -> ScanResult<(PortStatus, u8)> {
        if let Some(range) = self.forbidden(address) {
            trace!(address, label = range.label, "skipping reserved port");
            return Ok((PortStatus::Forbidden, 0));
        }

        let byte = self.io.read_byte(address)?;
        let status = if byte == FLOATING_BUS {
            PortStatus::Empty
        } else {
            PortStatus::Active
        };
        Ok((status, byte))
    }
}
