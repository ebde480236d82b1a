//! Scanner module - classifies a window of I/O ports.
//!
//! The engine walks an inclusive address window, classifies each address and
//! commits the results into a fixed-capacity buffer. The buffer capacity is
//! checked before the first read.

pub mod classifier;
pub mod devport;
pub mod simulated;
pub mod traits;

use crate::error::{ScanError, ScanResult};
use crate::types::PortWindow;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub use classifier::{ForbiddenRange, PortClassifier, FLOATING_BUS, FORBIDDEN_RANGES};
pub use devport::DevPort;
pub use simulated::SimulatedBus;
pub use traits::{BoxedIo, HardwareIo, PortRecord, PortStatus};

/// Number of records the result buffer holds (ports 0x000-0x3FF).
pub const PORT_CAPACITY: usize = 1024;

/// Fixed-capacity result buffer.
///
/// Record `i` describes address `window.start() + i`. Only the first
/// `len()` records belong to the last scan; the rest keep older contents.
#[derive(Debug, Clone)]
pub struct PortBuffer {
    records: Box<[PortRecord]>,
    len: usize,
    window: Option<PortWindow>,
}

impl PortBuffer {
    pub fn new() -> Self {
        Self::with_capacity(PORT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: vec![PortRecord::default(); capacity].into_boxed_slice(),
            len: 0,
            window: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    /// Number of records produced by the last scan.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Window of the last completed scan.
    pub fn window(&self) -> Option<PortWindow> {
        self.window
    }

    /// Records of the last scan.
    pub fn records(&self) -> &[PortRecord] {
        &self.records[..self.len]
    }

    /// Record at buffer index `index`, if it belongs to the last scan.
    pub fn get(&self, index: usize) -> Option<&PortRecord> {
        self.records().get(index)
    }

    /// Record for `address`, if it was covered by the last scan.
    pub fn record_for(&self, address: u16) -> Option<&PortRecord> {
        let window = self.window?;
        if !window.contains(address) {
            return None;
        }
        self.get(usize::from(address - window.start()))
    }

    /// Reject windows that do not fit the buffer.
    pub fn check_fits(&self, window: PortWindow) -> ScanResult<()> {
        if window.len() > self.capacity() {
            return Err(ScanError::RangeTooLarge {
                start: window.start(),
                end: window.end(),
                span: window.len(),
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    fn commit(&mut self, window: PortWindow, records: &[PortRecord]) {
        self.records[..records.len()].copy_from_slice(records);
        self.len = records.len();
        self.window = Some(window);
    }
}

impl Default for PortBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts from a completed scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub window: PortWindow,
    pub empty: usize,
    pub active: usize,
    pub forbidden: usize,
    pub elapsed: Duration,
}

impl ScanSummary {
    fn from_records(window: PortWindow, records: &[PortRecord], elapsed: Duration) -> Self {
        let count = |status: PortStatus| records.iter().filter(|r| r.status == status).count();
        Self {
            window,
            empty: count(PortStatus::Empty),
            active: count(PortStatus::Active),
            forbidden: count(PortStatus::Forbidden),
            elapsed,
        }
    }

    pub fn total(&self) -> usize {
        self.empty + self.active + self.forbidden
    }
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ports: {} active, {} empty, {} forbidden",
            self.total(),
            self.active,
            self.empty,
            self.forbidden
        )
    }
}

/// Walks a window and fills a [`PortBuffer`].
pub struct ScanEngine<I> {
    classifier: PortClassifier<I>,
    scans: u64,
}

impl<I: HardwareIo> ScanEngine<I> {
    /// Create an engine guarding the built-in forbidden table.
    pub fn new(io: I) -> Self {
        Self::with_classifier(PortClassifier::new(io))
    }

    pub fn with_classifier(classifier: PortClassifier<I>) -> Self {
        Self {
            classifier,
            scans: 0,
        }
    }

    pub fn classifier(&self) -> &PortClassifier<I> {
        &self.classifier
    }

    pub fn io(&self) -> &I {
        self.classifier.io()
    }

    /// Number of scans completed so far.
    pub fn scans(&self) -> u64 {
        self.scans
    }

    /// Scan `[start, end]` into `buffer`.
    ///
    /// Fails with `InvalidRange` when `start > end` and with `RangeTooLarge`
    /// when the span exceeds the buffer; neither performs any read. A read
    /// error aborts the scan and leaves `buffer` as it was.
    pub fn scan(
        &mut self,
        start: u16,
        end: u16,
        buffer: &mut PortBuffer,
    ) -> ScanResult<ScanSummary> {
        let window = PortWindow::new(start, end).inspect_err(|e| warn!("scan refused: {}", e))?;
        self.scan_window(window, buffer)
    }

    /// Scan a validated window into `buffer`.
    pub fn scan_window(
        &mut self,
        window: PortWindow,
        buffer: &mut PortBuffer,
    ) -> ScanResult<ScanSummary> {
        buffer
            .check_fits(window)
            .inspect_err(|e| warn!("scan refused: {}", e))?;

        let started = Instant::now();
        let mut records = Vec::with_capacity(window.len());
        for address in window.iter() {
            let (status, last_read) = self.classifier.classify(address)?;
            records.push(PortRecord::new(address, status, last_read));
        }
        buffer.commit(window, &records);
        self.scans += 1;

        let summary = ScanSummary::from_records(window, &records, started.elapsed());
        info!(
            window = %window,
            active = summary.active,
            empty = summary.empty,
            forbidden = summary.forbidden,
            elapsed_us = summary.elapsed.as_micros() as u64,
            "scan complete"
        );
        Ok(summary)
    }
}

/// Available hardware backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Backend {
    /// Real hardware if available, otherwise the simulated demo bus.
    #[default]
    Auto,
    /// Linux `/dev/port` (requires root).
    DevPort,
    /// In-memory demo bus; never touches hardware.
    Simulated,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::DevPort => write!(f, "dev-port"),
            Self::Simulated => write!(f, "simulated"),
        }
    }
}

/// A backend ready for use.
pub struct OpenedBackend {
    pub io: BoxedIo,
    /// Set when `Auto` could not reach real hardware and substituted the
    /// demo bus. The results it produces are made up.
    pub fallback: Option<String>,
}

impl OpenedBackend {
    fn direct(io: BoxedIo) -> Self {
        Self { io, fallback: None }
    }

    /// Substitute the demo bus because real hardware is unavailable.
    pub fn demo_fallback(reason: ScanError) -> Self {
        warn!("{}; falling back to simulated bus", reason);
        Self {
            io: Box::new(SimulatedBus::demo()),
            fallback: Some(format!(
                "No hardware access ({}). Showing SIMULATED demo data.",
                reason
            )),
        }
    }
}

/// Create a hardware backend.
pub fn create_backend(backend: Backend) -> ScanResult<OpenedBackend> {
    match backend {
        Backend::DevPort => Ok(OpenedBackend::direct(Box::new(DevPort::open()?))),
        Backend::Simulated => Ok(OpenedBackend::direct(Box::new(SimulatedBus::demo()))),
        Backend::Auto => Ok(match DevPort::open() {
            Ok(port) => OpenedBackend::direct(Box::new(port)),
            Err(e) => OpenedBackend::demo_fallback(e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_com1_window_is_all_forbidden() {
        let mut bus = SimulatedBus::new().with_byte(0x3F8, 0x12);
        let mut engine = ScanEngine::new(&mut bus);
        let mut buffer = PortBuffer::new();

        let summary = engine.scan(0x3F8, 0x3FF, &mut buffer).unwrap();
        assert_eq!(summary.forbidden, 8);
        assert_eq!(buffer.len(), 8);
        for (i, record) in buffer.records().iter().enumerate() {
            assert_eq!(record.address, 0x3F8 + i as u16);
            assert_eq!(record.status, PortStatus::Forbidden);
            assert_eq!(record.last_read, 0);
        }
        drop(engine);
        assert_eq!(bus.read_count(), 0);
    }

    #[test]
    fn test_records_indexed_from_window_start() {
        let mut bus = SimulatedBus::new().with_byte(0x302, 0x5A);
        let mut engine = ScanEngine::new(&mut bus);
        let mut buffer = PortBuffer::new();

        engine.scan(0x300, 0x30F, &mut buffer).unwrap();
        assert_eq!(buffer.get(2), Some(&PortRecord::new(0x302, PortStatus::Active, 0x5A)));
        assert_eq!(buffer.record_for(0x30F).map(|r| r.status), Some(PortStatus::Empty));
        assert!(buffer.record_for(0x310).is_none());
        assert!(buffer.get(16).is_none());
    }

    #[test]
    fn test_default_window_fills_buffer() {
        let mut engine = ScanEngine::new(SimulatedBus::demo());
        let mut buffer = PortBuffer::new();

        let summary = engine.scan(0x000, 0x3FF, &mut buffer).unwrap();
        assert_eq!(buffer.len(), PORT_CAPACITY);
        assert_eq!(summary.total(), PORT_CAPACITY);
        assert!(summary.active > 0);
        assert_eq!(engine.scans(), 1);
    }

    #[test]
    fn test_oversized_window_is_refused_without_reads() {
        let mut bus = SimulatedBus::new();
        let mut engine = ScanEngine::new(&mut bus);
        let mut buffer = PortBuffer::new();

        let err = engine.scan(0x000, 0x400, &mut buffer).unwrap_err();
        assert!(matches!(
            err,
            ScanError::RangeTooLarge {
                span: 1025,
                capacity: PORT_CAPACITY,
                ..
            }
        ));
        assert!(buffer.is_empty());
        drop(engine);
        assert_eq!(bus.read_count(), 0);
    }

    #[test]
    fn test_inverted_window_is_refused() {
        let mut bus = SimulatedBus::new();
        let mut engine = ScanEngine::new(&mut bus);
        let mut buffer = PortBuffer::new();

        let err = engine.scan(0x300, 0x200, &mut buffer).unwrap_err();
        assert!(matches!(err, ScanError::InvalidRange { start: 0x300, end: 0x200 }));
        assert_eq!(engine.scans(), 0);
        drop(engine);
        assert_eq!(bus.read_count(), 0);
    }

    #[test]
    fn test_high_window_within_capacity() {
        let mut engine = ScanEngine::new(SimulatedBus::new());
        let mut buffer = PortBuffer::new();

        engine.scan(0xFC00, 0xFFFF, &mut buffer).unwrap();
        assert_eq!(buffer.len(), PORT_CAPACITY);
        assert_eq!(buffer.records()[PORT_CAPACITY - 1].address, 0xFFFF);
    }

    #[test]
    fn test_rescan_reads_again() {
        let mut bus = SimulatedBus::new().with_sequence(0x300, [0x01, 0xFF]);
        let mut engine = ScanEngine::new(&mut bus);
        let mut buffer = PortBuffer::new();

        engine.scan(0x300, 0x300, &mut buffer).unwrap();
        assert_eq!(buffer.records()[0].status, PortStatus::Active);
        engine.scan(0x300, 0x300, &mut buffer).unwrap();
        assert_eq!(buffer.records()[0].status, PortStatus::Empty);
        drop(engine);
        assert_eq!(bus.read_count(), 2);
    }

    #[test]
    fn test_shorter_rescan_keeps_len_in_sync() {
        let mut engine = ScanEngine::new(SimulatedBus::new());
        let mut buffer = PortBuffer::new();

        engine.scan(0x200, 0x2FF, &mut buffer).unwrap();
        engine.scan(0x200, 0x20F, &mut buffer).unwrap();
        assert_eq!(buffer.len(), 16);
        assert_eq!(buffer.window(), Some(PortWindow::new(0x200, 0x20F).unwrap()));
    }

    /// Fails on one address, floats everywhere else.
    struct FaultyBus {
        bad: u16,
    }

    impl HardwareIo for FaultyBus {
        fn name(&self) -> &'static str {
            "faulty"
        }

        fn read_byte(&mut self, address: u16) -> ScanResult<u8> {
            if address == self.bad {
                Err(ScanError::Read {
                    address,
                    source: std::io::Error::new(std::io::ErrorKind::Other, "bus fault"),
                })
            } else {
                Ok(FLOATING_BUS)
            }
        }
    }

    #[test]
    fn test_failed_read_keeps_previous_results() {
        let mut buffer = PortBuffer::new();
        ScanEngine::new(SimulatedBus::new().with_byte(0x300, 0x42))
            .scan(0x300, 0x30F, &mut buffer)
            .unwrap();

        let mut engine = ScanEngine::new(FaultyBus { bad: 0x205 });
        let err = engine.scan(0x200, 0x20F, &mut buffer).unwrap_err();
        assert!(matches!(err, ScanError::Read { address: 0x205, .. }));
        assert_eq!(engine.scans(), 0);

        assert_eq!(buffer.window(), Some(PortWindow::new(0x300, 0x30F).unwrap()));
        assert_eq!(buffer.len(), 16);
        assert_eq!(buffer.records()[0].status, PortStatus::Active);
    }

    #[test]
    fn test_demo_fallback_is_flagged() {
        let opened = OpenedBackend::demo_fallback(ScanError::Unavailable(
            "/dev/port: Permission denied".into(),
        ));
        assert_eq!(opened.io.name(), "simulated");
        let notice = opened.fallback.unwrap();
        assert!(notice.contains("/dev/port: Permission denied"));
        assert!(notice.contains("SIMULATED"));
    }

    #[test]
    fn test_simulated_backend() {
        let opened = create_backend(Backend::Simulated).unwrap();
        assert_eq!(opened.io.name(), "simulated");
        assert!(!opened.io.requires_privileges());
        assert!(opened.fallback.is_none());
    }
}
