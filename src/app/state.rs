//! Application state owned by the event loop.

use crate::app::field::InputField;
use crate::config::{Glyphs, GridGeometry, Settings};
use crate::scanner::PortBuffer;
use crate::types::{format_hex4, ScanCode};
use std::fmt;

/// The three screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Input,
    Visualize,
    Settings,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Input, Screen::Visualize, Screen::Settings];

    /// Title shown in the title bar.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Input => "IOPROBE - ISA PORT SCANNER v1.0",
            Self::Visualize => "PORT VISUALIZATION",
            Self::Settings => "SETTINGS - PRESS ESC TO QUIT",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Visualize => write!(f, "visualize"),
            Self::Settings => write!(f, "settings"),
        }
    }
}

/// A global key binding that switches screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotKey {
    pub trigger: ScanCode,
    pub target: Screen,
}

/// Screen hot-keys, checked in order; the first matching trigger wins.
pub const HOT_KEYS: &[HotKey] = &[
    HotKey {
        trigger: ScanCode::F1,
        target: Screen::Input,
    },
    HotKey {
        trigger: ScanCode::F2,
        target: Screen::Visualize,
    },
    HotKey {
        trigger: ScanCode::F10,
        target: Screen::Settings,
    },
];

/// Identifies one of the two range fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Start = 0,
    End = 1,
}

pub const FIELD_COUNT: usize = 2;

/// Visualization configuration and the active scan window.
///
/// `start_port`/`end_port` are stored unvalidated: the fields may describe an
/// inverted range, which the scan rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisConfig {
    pub grid: GridGeometry,
    pub glyphs: Glyphs,
    pub start_port: u16,
    pub end_port: u16,
}

/// Everything the event loop mutates.
#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    active_field: usize,
    pub fields: [InputField; FIELD_COUNT],
    pub ports: PortBuffer,
    pub vis: VisConfig,
    /// Outcome of the last scan, shown on the message line.
    pub message: Option<Message>,
}

/// A line of feedback for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Info(String),
    Error(String),
}

impl Message {
    pub fn text(&self) -> &str {
        match self {
            Self::Info(text) | Self::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        let start = settings.window.start();
        let end = settings.window.end();
        Self {
            screen: Screen::Input,
            active_field: 0,
            fields: [
                InputField::new("Start Port:", 15, 5, 4, &format_hex4(start)),
                InputField::new("End Port:", 15, 6, 4, &format_hex4(end)),
            ],
            ports: PortBuffer::new(),
            vis: VisConfig {
                grid: settings.grid,
                glyphs: settings.glyphs,
                start_port: start,
                end_port: end,
            },
            message: None,
        }
    }

    pub fn active_field(&self) -> usize {
        self.active_field
    }

    pub fn field(&self, id: FieldId) -> &InputField {
        &self.fields[id as usize]
    }

    pub fn active_field_mut(&mut self) -> &mut InputField {
        &mut self.fields[self.active_field]
    }

    /// Move focus to the next field, wrapping around.
    pub fn next_field(&mut self) {
        self.active_field = (self.active_field + 1) % self.fields.len();
    }

    /// Copy complete field values into the scan window.
    ///
    /// A partial field leaves its end of the window untouched.
    pub fn sync_window(&mut self) {
        if let Some(start) = self.field(FieldId::Start).value() {
            self.vis.start_port = start;
        }
        if let Some(end) = self.field(FieldId::End).value() {
            self.vis.end_port = end;
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
