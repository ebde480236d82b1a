//! Text-mode rendering.
//!
//! The core never talks to a terminal directly. It builds a [`View`] from
//! the application state and hands it to [`draw`], which emits individual
//! cells through a [`CellWriter`]. Backends:
//!
//! - [`Terminal`] - crossterm, for interactive use (keys via [`TerminalKeys`])
//! - [`MemoryScreen`] - an 80x25 buffer, for tests

mod memory;
mod model;
mod terminal;

pub use memory::MemoryScreen;
pub use model::{Body, Cell, FieldView, GridView, LegendEntry, SystemInfo, View};
pub use terminal::{input_from_crossterm, key_from_crossterm, Terminal, TerminalKeys};

use crate::config::{SCREEN_COLS, SCREEN_ROWS};
use std::io;

/// Colour classes, each tied to a CGA text attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorClass {
    /// Grey on black.
    #[default]
    Normal,
    /// White on black.
    Bright,
    /// Dark grey, for empty ports.
    Empty,
    /// Bright green, for active ports.
    Active,
    /// Bright red, for forbidden ports.
    Forbidden,
    /// Black on grey, for the focused field.
    Highlight,
    /// Yellow, for error messages.
    Alert,
}

impl ColorClass {
    /// The CGA attribute byte (background in the high nibble).
    pub const fn attribute(self) -> u8 {
        match self {
            Self::Normal => 0x07,
            Self::Bright => 0x0F,
            Self::Empty => 0x08,
            Self::Active => 0x0A,
            Self::Forbidden => 0x0C,
            Self::Highlight => 0x70,
            Self::Alert => 0x0E,
        }
    }
}

/// Sink for character cells.
pub trait CellWriter {
    /// Blank the whole screen.
    fn clear(&mut self) -> io::Result<()>;

    /// Write one glyph at column `x`, row `y`.
    fn put(&mut self, x: u16, y: u16, glyph: char, color: ColorClass) -> io::Result<()>;

    /// Make everything written since the last call visible.
    fn present(&mut self) -> io::Result<()>;
}

/// Write `text` starting at (`x`, `y`), clipped at the right edge.
pub fn write_str<W: CellWriter + ?Sized>(
    out: &mut W,
    x: u16,
    y: u16,
    text: &str,
    color: ColorClass,
) -> io::Result<()> {
    for (col, ch) in (x..SCREEN_COLS).zip(text.chars()) {
        out.put(col, y, ch, color)?;
    }
    Ok(())
}

/// Write `text` centred on row `y`.
pub fn write_centered<W: CellWriter + ?Sized>(
    out: &mut W,
    y: u16,
    text: &str,
    color: ColorClass,
) -> io::Result<()> {
    let len = text.chars().count().min(usize::from(SCREEN_COLS)) as u16;
    write_str(out, (SCREEN_COLS - len) / 2, y, text, color)
}

/// Draw a single-line box with its top-left corner at (`x`, `y`).
pub fn draw_box<W: CellWriter + ?Sized>(
    out: &mut W,
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    color: ColorClass,
) -> io::Result<()> {
    if w < 2 || h < 2 {
        return Ok(());
    }
    let (right, bottom) = (x + w - 1, y + h - 1);

    out.put(x, y, '┌', color)?;
    out.put(right, y, '┐', color)?;
    out.put(x, bottom, '└', color)?;
    out.put(right, bottom, '┘', color)?;

    for col in x + 1..right {
        out.put(col, y, '─', color)?;
        out.put(col, bottom, '─', color)?;
    }
    for row in y + 1..bottom {
        out.put(x, row, '│', color)?;
        out.put(right, row, '│', color)?;
    }
    Ok(())
}

/// Row of the message line.
pub const MESSAGE_ROW: u16 = SCREEN_ROWS - 3;
/// Row of the range line on the visualize screen.
pub const RANGE_ROW: u16 = SCREEN_ROWS - 2;
/// Row of the instruction line.
pub const INSTRUCTION_ROW: u16 = SCREEN_ROWS - 1;
/// Row of the visualize legend.
pub const LEGEND_ROW: u16 = 4;

/// Draw a complete frame.
pub fn draw<W: CellWriter + ?Sized>(out: &mut W, view: &View) -> io::Result<()> {
    out.clear()?;

    write_centered(out, 1, view.title, ColorClass::Bright)?;
    draw_box(out, 0, 0, SCREEN_COLS, 3, ColorClass::Normal)?;

    match &view.body {
        Body::Input(fields) => {
            for field in fields {
                draw_field(out, field)?;
            }
        }
        Body::Visualize(grid) => draw_grid(out, grid)?,
        Body::Settings(lines) => {
            for (row, line) in (5..MESSAGE_ROW).zip(lines) {
                write_str(out, 4, row, line, ColorClass::Normal)?;
            }
        }
    }

    if let Some((text, color)) = &view.message {
        write_str(out, 2, MESSAGE_ROW, text, *color)?;
    }

    let (col, text) = view.instructions;
    write_str(out, col, INSTRUCTION_ROW, text, ColorClass::Normal)?;

    out.present()
}

fn draw_field<W: CellWriter + ?Sized>(out: &mut W, field: &FieldView) -> io::Result<()> {
    let label_len = field.label.chars().count() as u16;
    let label_x = field.x.saturating_sub(label_len + 1);
    write_str(out, label_x, field.y, field.label, ColorClass::Normal)?;

    let color = if field.active {
        ColorClass::Highlight
    } else {
        ColorClass::Normal
    };
    out.put(field.x, field.y, '[', ColorClass::Normal)?;
    let padded = format!("{:<width$}", field.value, width = field.width);
    write_str(out, field.x + 1, field.y, &padded, color)?;
    out.put(
        field.x + 1 + field.width as u16,
        field.y,
        ']',
        ColorClass::Normal,
    )
}

fn draw_grid<W: CellWriter + ?Sized>(out: &mut W, grid: &GridView) -> io::Result<()> {
    write_str(out, 2, LEGEND_ROW, "Legend:", ColorClass::Bright)?;
    let mut col = 10;
    for entry in &grid.legend {
        out.put(col, LEGEND_ROW, entry.glyph, entry.color)?;
        write_str(out, col + 2, LEGEND_ROW, entry.label, ColorClass::Normal)?;
        col += entry.label.len() as u16 + 4;
    }

    let geometry = grid.geometry;
    let label_x = geometry.x.saturating_sub(crate::config::ROW_LABEL_WIDTH);
    for (row, label) in grid.row_labels.iter().enumerate() {
        write_str(out, label_x, geometry.y + row as u16, label, ColorClass::Normal)?;
    }

    for (index, cell) in grid.cells.iter().enumerate() {
        let col = (index % usize::from(geometry.cols)) as u16;
        let row = (index / usize::from(geometry.cols)) as u16;
        out.put(geometry.x + col, geometry.y + row, cell.glyph, cell.color)?;
    }

    write_str(out, 2, RANGE_ROW, "Range: 0x", ColorClass::Normal)?;
    write_str(out, 11, RANGE_ROW, &grid.range.0, ColorClass::Bright)?;
    write_str(out, 15, RANGE_ROW, " - 0x", ColorClass::Normal)?;
    write_str(out, 20, RANGE_ROW, &grid.range.1, ColorClass::Bright)?;
    Ok(())
}
