//! In-memory screen used by tests.

use crate::config::{SCREEN_COLS, SCREEN_ROWS};
use crate::render::{CellWriter, ColorClass};
use std::io;

/// An 80x25 cell buffer. Writes outside the screen are dropped.
#[derive(Debug, Clone)]
pub struct MemoryScreen {
    cells: Vec<(char, ColorClass)>,
    frames: usize,
}

impl MemoryScreen {
    pub fn new() -> Self {
        Self {
            cells: vec![
                (' ', ColorClass::Normal);
                usize::from(SCREEN_COLS) * usize::from(SCREEN_ROWS)
            ],
            frames: 0,
        }
    }

    fn index(x: u16, y: u16) -> Option<usize> {
        (x < SCREEN_COLS && y < SCREEN_ROWS)
            .then(|| usize::from(y) * usize::from(SCREEN_COLS) + usize::from(x))
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<(char, ColorClass)> {
        Self::index(x, y).map(|i| self.cells[i])
    }

    /// Text of row `y` with trailing blanks removed.
    pub fn row_text(&self, y: u16) -> String {
        let start = usize::from(y) * usize::from(SCREEN_COLS);
        let row: String = self
            .cells
            .get(start..start + usize::from(SCREEN_COLS))
            .map(|cells| cells.iter().map(|c| c.0).collect())
            .unwrap_or_default();
        row.trim_end().to_string()
    }

    /// The whole screen, one line per row.
    pub fn text(&self) -> String {
        (0..SCREEN_ROWS)
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Default for MemoryScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl CellWriter for MemoryScreen {
    fn clear(&mut self) -> io::Result<()> {
        self.cells.fill((' ', ColorClass::Normal));
        Ok(())
    }

    fn put(&mut self, x: u16, y: u16, glyph: char, color: ColorClass) -> io::Result<()> {
        if let Some(i) = Self::index(x, y) {
            self.cells[i] = (glyph, color);
        }
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.frames += 1;
        Ok(())
    }
}
