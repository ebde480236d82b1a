//! Runtime settings.
//!
//! Settings are assembled from defaults and command-line/environment
//! overrides. Nothing is read from or written to disk.

use crate::error::{ConfigError, ConfigResult};
use crate::scanner::{Backend, PortStatus};
use crate::types::PortWindow;

/// Width of the text screen in cells.
pub const SCREEN_COLS: u16 = 80;
/// Height of the text screen in cells.
pub const SCREEN_ROWS: u16 = 25;

/// Columns reserved left of the grid for the row address label.
pub const ROW_LABEL_WIDTH: u16 = 5;

/// Placement and size of the visualization grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    /// Left column of the first cell.
    pub x: u16,
    /// Top row of the first cell.
    pub y: u16,
    pub cols: u16,
    pub rows: u16,
}

impl GridGeometry {
    /// Number of cells in the grid.
    pub const fn cells(&self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            x: 8,
            y: 6,
            cols: 64,
            rows: 16,
        }
    }
}

/// Glyph drawn for each port status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub empty: char,
    pub active: char,
    pub forbidden: char,
    pub unknown: char,
}

impl Glyphs {
    /// Code page 437 style block glyphs.
    pub const BLOCKS: Self = Self {
        empty: '·',
        active: '█',
        forbidden: '▒',
        unknown: '?',
    };

    /// Plain ASCII for terminals without Unicode.
    pub const ASCII: Self = Self {
        empty: '.',
        active: '#',
        forbidden: 'x',
        unknown: '?',
    };

    pub const fn for_status(&self, status: PortStatus) -> char {
        match status {
            PortStatus::Unknown => self.unknown,
            PortStatus::Empty => self.empty,
            PortStatus::Active => self.active,
            PortStatus::Forbidden => self.forbidden,
        }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::BLOCKS
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Hardware backend to open.
    pub backend: Backend,
    /// Scan window the input fields start with.
    pub window: PortWindow,
    pub grid: GridGeometry,
    pub glyphs: Glyphs,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            window: PortWindow::DEFAULT,
            grid: GridGeometry::default(),
            glyphs: Glyphs::default(),
        }
    }
}

impl Settings {
    /// Set the initial scan window.
    pub fn with_window(mut self, window: PortWindow) -> Self {
        self.window = window;
        self
    }

    /// Set the hardware backend.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Set the glyph set.
    pub fn with_glyphs(mut self, glyphs: Glyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Set the grid geometry.
    pub fn with_grid(mut self, grid: GridGeometry) -> Self {
        self.grid = grid;
        self
    }

    /// Validate that the grid fits on screen between the legend and the
    /// message line.
    pub fn validate(&self) -> ConfigResult<()> {
        let grid = &self.grid;
        if grid.cols == 0 || grid.rows == 0 {
            return Err(ConfigError::InvalidGrid(format!(
                "{}x{} grid has no cells",
                grid.cols, grid.rows
            )));
        }
        if grid.x < ROW_LABEL_WIDTH {
            return Err(ConfigError::InvalidGrid(format!(
                "grid column {} leaves no room for row labels",
                grid.x
            )));
        }
        if grid.y < 5 {
            return Err(ConfigError::InvalidGrid(format!(
                "grid row {} overlaps the title bar or legend",
                grid.y
            )));
        }
        if u32::from(grid.x) + u32::from(grid.cols) > u32::from(SCREEN_COLS) {
            return Err(ConfigError::InvalidGrid(format!(
                "{} columns starting at {} exceed screen width {}",
                grid.cols, grid.x, SCREEN_COLS
            )));
        }
        if u32::from(grid.y) + u32::from(grid.rows) > u32::from(SCREEN_ROWS - 3) {
            return Err(ConfigError::InvalidGrid(format!(
                "{} rows starting at {} overlap the status lines",
                grid.rows, grid.y
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.window, PortWindow::new(0x000, 0x3FF).unwrap());
        assert_eq!(settings.grid.cols, 64);
        assert_eq!(settings.grid.rows, 16);
        assert_eq!(settings.grid.cells(), 1024);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_grid_must_fit_screen() {
        let wide = Settings::default().with_grid(GridGeometry {
            x: 20,
            y: 6,
            cols: 64,
            rows: 16,
        });
        assert!(matches!(wide.validate(), Err(ConfigError::InvalidGrid(_))));

        let tall = Settings::default().with_grid(GridGeometry {
            x: 8,
            y: 6,
            cols: 32,
            rows: 17,
        });
        assert!(tall.validate().is_err());

        let empty = Settings::default().with_grid(GridGeometry {
            x: 8,
            y: 6,
            cols: 0,
            rows: 16,
        });
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(Glyphs::ASCII.for_status(PortStatus::Active), '#');
        assert_eq!(Glyphs::BLOCKS.for_status(PortStatus::Forbidden), '▒');
        assert_eq!(Glyphs::BLOCKS.for_status(PortStatus::Unknown), '?');
    }
}
