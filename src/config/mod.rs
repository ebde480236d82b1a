//! Configuration management for ioprobe.
//!
//! Screen geometry, glyphs, the initial scan window and the hardware
//! backend choice.

mod settings;

pub use settings::{
    Glyphs, GridGeometry, Settings, ROW_LABEL_WIDTH, SCREEN_COLS, SCREEN_ROWS,
};
