//! Key events as delivered by a keyboard source.
//!
//! A key press is a (character, scan code) pair in the style of the PC BIOS
//! keyboard service: function and editing keys are identified by their
//! set-1 scan code, printable keys by their character.

use std::fmt;

/// A PC set-1 keyboard scan code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScanCode(pub u8);

impl ScanCode {
    /// No scan code (printable keys from sources that only report characters).
    pub const NONE: Self = Self(0x00);
    pub const ESC: Self = Self(0x01);
    pub const BACKSPACE: Self = Self(0x0E);
    pub const TAB: Self = Self(0x0F);
    pub const ENTER: Self = Self(0x1C);
    pub const F1: Self = Self(0x3B);
    pub const F2: Self = Self(0x3C);
    pub const F3: Self = Self(0x3D);
    pub const F4: Self = Self(0x3E);
    pub const F5: Self = Self(0x3F);
    pub const F6: Self = Self(0x40);
    pub const F7: Self = Self(0x41);
    pub const F8: Self = Self(0x42);
    pub const F9: Self = Self(0x43);
    pub const F10: Self = Self(0x44);

    /// Scan code for function key `F<n>`, `n` in `1..=10`.
    pub const fn function(n: u8) -> Option<Self> {
        if n >= 1 && n <= 10 {
            Some(Self(Self::F1.0 + n - 1))
        } else {
            None
        }
    }
}

impl fmt::Display for ScanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ESC => write!(f, "ESC"),
            Self::BACKSPACE => write!(f, "BACKSPACE"),
            Self::TAB => write!(f, "TAB"),
            Self::ENTER => write!(f, "ENTER"),
            Self(code) if (Self::F1.0..=Self::F10.0).contains(&code) => {
                write!(f, "F{}", code - Self::F1.0 + 1)
            }
            Self(code) => write!(f, "0x{:02X}", code),
        }
    }
}

/// One key press: the character it produced (if any) and its scan code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyPress {
    pub ch: Option<char>,
    pub scan: ScanCode,
}

impl KeyPress {
    /// A printable key.
    pub const fn char(ch: char) -> Self {
        Self {
            ch: Some(ch),
            scan: ScanCode::NONE,
        }
    }

    /// A key identified only by scan code.
    pub const fn scan(scan: ScanCode) -> Self {
        Self { ch: None, scan }
    }

    pub const fn esc() -> Self {
        Self::scan(ScanCode::ESC)
    }

    pub const fn enter() -> Self {
        Self {
            ch: Some('\r'),
            scan: ScanCode::ENTER,
        }
    }

    pub const fn tab() -> Self {
        Self {
            ch: Some('\t'),
            scan: ScanCode::TAB,
        }
    }

    pub const fn backspace() -> Self {
        Self {
            ch: Some('\u{8}'),
            scan: ScanCode::BACKSPACE,
        }
    }
}
