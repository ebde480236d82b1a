//! # ioprobe - A Legacy ISA I/O Port Scanner
//!
//! ioprobe reads a window of the 16-bit I/O port space, classifies each
//! address and shows the result as a colour-coded grid in an 80x25 text
//! screen. Addresses claimed by core system devices are never read.
//!
//! ## Features
//!
//! - **Safe Probing**: a fixed table of reserved ranges is skipped
//! - **Pluggable Hardware**: `/dev/port` on Linux, or a scripted bus
//! - **Atomic Scans**: a failed scan leaves earlier results untouched
//! - **Headless Reports**: plain text, JSON, and CSV
//!
//! ## Example Usage
//!
//! ```rust
//! use ioprobe::scanner::{PortBuffer, PortStatus, ScanEngine, SimulatedBus};
//!
//! let mut engine = ScanEngine::new(SimulatedBus::new().with_byte(0x300, 0x42));
//! let mut buffer = PortBuffer::new();
//! let summary = engine.scan(0x2FF, 0x301, &mut buffer).unwrap();
//!
//! assert_eq!(summary.active, 1);
//! assert_eq!(buffer.record_for(0x300).unwrap().status, PortStatus::Active);
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Port windows, hex parsing and key presses
//! - [`scanner`] - Hardware access, classification and the scan engine
//! - [`app`] - Input fields, screens and the key-driven state machine
//! - [`render`] - View model and text-cell drawing
//! - [`config`] - Screen geometry, glyphs and backend selection
//! - [`output`] - Report formatting
//! - [`error`] - Error types

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod render;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use app::{App, AppState, Screen, ScreenStateMachine};
pub use error::{CliError, ScanError};
pub use scanner::{HardwareIo, PortBuffer, PortClassifier, PortStatus, ScanEngine};
pub use types::{KeyPress, PortWindow, ScanCode};
