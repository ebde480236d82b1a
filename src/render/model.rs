//! Frame contents derived from the application state.
//!
//! A `View` is everything the drawing code needs and nothing more; it holds
//! no references into the state so it can be built, inspected and dropped
//! freely.

use crate::app::{AppState, Screen};
use crate::config::{Glyphs, GridGeometry};
use crate::render::ColorClass;
use crate::scanner::{PortRecord, PortStatus};
use crate::types::format_hex4;

const INPUT_HELP: (u16, &str) = (
    2,
    "TAB: Next Field  ENTER: Scan  F2: Visualize  F10: Settings",
);
const VISUALIZE_HELP: (u16, &str) = (35, "F1: Input  F10: Settings  R: Rescan");
const SETTINGS_HELP: (u16, &str) = (2, "F1: Input  F2: Visualize  ESC: Quit");

/// Facts about the running session that are not part of the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemInfo {
    /// Name of the hardware backend.
    pub backend: &'static str,
    /// Whether the backend touches real hardware.
    pub privileged: bool,
    /// Number of reserved ranges that are never probed.
    pub reserved_ranges: usize,
}

/// One input field as drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: &'static str,
    pub x: u16,
    pub y: u16,
    pub value: String,
    pub width: usize,
    pub active: bool,
}

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: ColorClass,
    /// `None` for cells past the end of the last scan.
    pub status: Option<PortStatus>,
}

impl Cell {
    const BLANK: Self = Self {
        glyph: ' ',
        color: ColorClass::Normal,
        status: None,
    };

    fn for_status(status: PortStatus, glyphs: &Glyphs) -> Self {
        Self {
            glyph: glyphs.for_status(status),
            color: status_color(status),
            status: Some(status),
        }
    }
}

/// Legend item on the visualize screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry {
    pub glyph: char,
    pub color: ColorClass,
    pub label: &'static str,
}

/// The port grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub geometry: GridGeometry,
    /// Row-major, `cols * rows` entries.
    pub cells: Vec<Cell>,
    /// Base address of each row as four hex digits.
    pub row_labels: Vec<String>,
    /// Active scan window as hex digits.
    pub range: (String, String),
    pub legend: Vec<LegendEntry>,
}

/// Screen-specific part of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Input(Vec<FieldView>),
    Visualize(GridView),
    Settings(Vec<String>),
}

/// A complete frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub screen: Screen,
    pub title: &'static str,
    pub body: Body,
    pub message: Option<(String, ColorClass)>,
    /// Column and text of the instruction line.
    pub instructions: (u16, &'static str),
}

impl View {
    pub fn build(state: &AppState, info: &SystemInfo) -> Self {
        let (body, instructions) = match state.screen {
            Screen::Input => (Body::Input(input_fields(state)), INPUT_HELP),
            Screen::Visualize => (Body::Visualize(grid(state)), VISUALIZE_HELP),
            Screen::Settings => (Body::Settings(settings_lines(state, info)), SETTINGS_HELP),
        };

        let message = state.message.as_ref().map(|m| {
            let color = if m.is_error() {
                ColorClass::Alert
            } else {
                ColorClass::Normal
            };
            (m.text().to_string(), color)
        });

        Self {
            screen: state.screen,
            title: state.screen.title(),
            body,
            message,
            instructions,
        }
    }
}

/// Colour class of a port status.
pub fn status_color(status: PortStatus) -> ColorClass {
    match status {
        PortStatus::Unknown => ColorClass::Normal,
        PortStatus::Empty => ColorClass::Empty,
        PortStatus::Active => ColorClass::Active,
        PortStatus::Forbidden => ColorClass::Forbidden,
    }
}

fn input_fields(state: &AppState) -> Vec<FieldView> {
    state
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| FieldView {
            label: field.label,
            x: field.x,
            y: field.y,
            value: field.text().to_string(),
            width: field.max_len(),
            active: i == state.active_field(),
        })
        .collect()
}

fn grid(state: &AppState) -> GridView {
    let vis = &state.vis;
    let geometry = vis.grid;
    let cols = usize::from(geometry.cols);
    let base = state
        .ports
        .window()
        .map_or(vis.start_port, |w| w.start());

    let cells = (0..geometry.cells())
        .map(|index| match state.ports.window() {
            None => Cell::for_status(PortStatus::Unknown, &vis.glyphs),
            Some(_) => state
                .ports
                .get(index)
                .map_or(Cell::BLANK, |r: &PortRecord| {
                    Cell::for_status(r.status, &vis.glyphs)
                }),
        })
        .collect();

    let row_labels = (0..usize::from(geometry.rows))
        .map(|row| format_hex4(base.wrapping_add((row * cols) as u16)))
        .collect();

    let legend = vec![
        LegendEntry {
            glyph: vis.glyphs.empty,
            color: ColorClass::Empty,
            label: "Empty (0xFF)",
        },
        LegendEntry {
            glyph: vis.glyphs.active,
            color: ColorClass::Active,
            label: "Active",
        },
        LegendEntry {
            glyph: vis.glyphs.forbidden,
            color: ColorClass::Forbidden,
            label: "Forbidden",
        },
    ];

    GridView {
        geometry,
        cells,
        row_labels,
        range: (format_hex4(vis.start_port), format_hex4(vis.end_port)),
        legend,
    }
}

fn settings_lines(state: &AppState, info: &SystemInfo) -> Vec<String> {
    let vis = &state.vis;
    vec![
        if info.privileged {
            format!("Backend:          {} (raw hardware access)", info.backend)
        } else {
            format!("Backend:          {}", info.backend)
        },
        format!(
            "Grid:             {}x{} cells at column {}, row {}",
            vis.grid.cols, vis.grid.rows, vis.grid.x, vis.grid.y
        ),
        format!(
            "Glyphs:           empty '{}'  active '{}'  forbidden '{}'",
            vis.glyphs.empty, vis.glyphs.active, vis.glyphs.forbidden
        ),
        format!("Reserved ranges:  {} (never probed)", info.reserved_ranges),
        format!("Buffer capacity:  {} ports", state.ports.capacity()),
    ]
}
