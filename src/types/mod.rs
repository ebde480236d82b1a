//! Core type definitions using newtype patterns for type safety.
//!
//! `PortWindow` cannot be inverted once built, and keys carry a typed scan
//! code instead of a bare byte.

mod key;
mod port;

pub use key::{KeyPress, ScanCode};
pub use port::{format_hex4, parse_hex, PortWindow};
