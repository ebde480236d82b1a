//! Scripted in-memory bus.
//!
//! Every address floats at 0xFF unless a byte or a sequence of bytes has been
//! installed for it. Reads are logged so callers can check which addresses
//! were touched.

use crate::error::ScanResult;
use crate::scanner::classifier::FLOATING_BUS;
use crate::scanner::traits::HardwareIo;
use std::collections::{HashMap, VecDeque};

/// A simulated ISA bus.
#[derive(Debug, Clone, Default)]
pub struct SimulatedBus {
    values: HashMap<u16, VecDeque<u8>>,
    reads: Vec<u16>,
}

impl SimulatedBus {
    /// An empty bus: every address reads 0xFF.
    pub fn new() -> Self {
        Self::default()
    }

    /// A bus populated like a typical ISA machine.
    pub fn demo() -> Self {
        let mut bus = Self::new()
            // Game port
            .with_byte(0x201, 0xF0)
            // LPT1 data, status, control
            .with_byte(0x278, 0x00)
            .with_byte(0x279, 0x7F)
            .with_byte(0x27A, 0xCC);

        // Sound card DSP
        for (offset, byte) in [0x00u8, 0x80, 0x00, 0x00, 0x3F, 0x00, 0x00, 0xAA]
            .into_iter()
            .enumerate()
        {
            bus = bus.with_byte(0x220 + offset as u16, byte);
        }
        // COM2 UART registers
        for (offset, byte) in [0x00u8, 0x00, 0x01, 0x03, 0x0B, 0x60, 0xB0, 0x00]
            .into_iter()
            .enumerate()
        {
            bus = bus.with_byte(0x2F8 + offset as u16, byte);
        }
        // NE2000 network card register window
        for offset in 0..0x20u16 {
            bus = bus.with_byte(0x300 + offset, 0x21 ^ offset as u8);
        }
        bus
    }

    /// Make `address` always read `byte`.
    pub fn with_byte(mut self, address: u16, byte: u8) -> Self {
        self.values.insert(address, VecDeque::from([byte]));
        self
    }

    /// Script successive reads of `address`.
    ///
    /// Each read consumes one byte; the last byte keeps being returned once
    /// the sequence is exhausted. An empty sequence leaves the address
    /// floating.
    pub fn with_sequence(mut self, address: u16, bytes: impl IntoIterator<Item = u8>) -> Self {
        let bytes: VecDeque<u8> = bytes.into_iter().collect();
        if bytes.is_empty() {
            self.values.remove(&address);
        } else {
            self.values.insert(address, bytes);
        }
        self
    }

    /// Every address read so far, in order.
    pub fn reads(&self) -> &[u16] {
        &self.reads
    }

    pub fn read_count(&self) -> usize {
        self.reads.len()
    }

    pub fn clear_reads(&mut self) {
        self.reads.clear();
    }
}

impl HardwareIo for SimulatedBus {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn read_byte(&mut self, address: u16) -> ScanResult<u8> {
        self.reads.push(address);
        let byte = match self.values.get_mut(&address) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or(FLOATING_BUS),
            Some(queue) => queue.front().copied().unwrap_or(FLOATING_BUS),
            None => FLOATING_BUS,
        };
        Ok(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_addresses_float() {
        let mut bus = SimulatedBus::new();
        assert_eq!(bus.read_byte(0x123).unwrap(), 0xFF);
        assert_eq!(bus.reads(), &[0x123]);
    }

    #[test]
    fn test_sequence_sticks_on_last_byte() {
        let mut bus = SimulatedBus::new().with_sequence(0x300, [1, 2, 3]);
        let bytes: Vec<u8> = (0..5).map(|_| bus.read_byte(0x300).unwrap()).collect();
        assert_eq!(bytes, vec![1, 2, 3, 3, 3]);
        assert_eq!(bus.read_count(), 5);
    }

    #[test]
    fn test_empty_sequence_floats() {
        let mut bus = SimulatedBus::new()
            .with_byte(0x300, 0x10)
            .with_sequence(0x300, []);
        assert_eq!(bus.read_byte(0x300).unwrap(), 0xFF);
    }

    #[test]
    fn test_demo_has_devices() {
        let mut bus = SimulatedBus::demo();
        assert_ne!(bus.read_byte(0x220).unwrap(), 0xFF);
        assert_ne!(bus.read_byte(0x300).unwrap(), 0xFF);
        assert_eq!(bus.read_byte(0x280).unwrap(), 0xFF);
        bus.clear_reads();
        assert_eq!(bus.read_count(), 0);
    }
}
