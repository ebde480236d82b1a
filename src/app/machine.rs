//! Screen transitions and per-screen key handling.

use crate::app::state::{AppState, HotKey, Message, Screen, HOT_KEYS};
use crate::scanner::{HardwareIo, ScanEngine};
use crate::types::{KeyPress, ScanCode};
use tracing::debug;

/// What the event loop should do after a key has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Dispatches key presses to the active screen.
///
/// Each key is processed in three steps:
/// 1. complete input fields are copied into the scan window;
/// 2. the hot-key table is consulted and may switch screens;
/// 3. the key is handed to the handler of the screen that is active now.
#[derive(Debug, Clone)]
pub struct ScreenStateMachine {
    hot_keys: Vec<HotKey>,
}

impl Default for ScreenStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenStateMachine {
    pub fn new() -> Self {
        Self::with_hot_keys(HOT_KEYS.to_vec())
    }

    /// Use a custom hot-key table. Entries are checked in order.
    pub fn with_hot_keys(hot_keys: Vec<HotKey>) -> Self {
        Self { hot_keys }
    }

    pub fn hot_keys(&self) -> &[HotKey] {
        &self.hot_keys
    }

    /// Screen bound to `scan`, first match wins.
    pub fn hot_key_target(&self, scan: ScanCode) -> Option<Screen> {
        self.hot_keys
            .iter()
            .find(|hk| hk.trigger == scan)
            .map(|hk| hk.target)
    }

    /// Process one key press.
    pub fn handle<I: HardwareIo>(
        &self,
        state: &mut AppState,
        engine: &mut ScanEngine<I>,
        key: KeyPress,
    ) -> Flow {
        state.sync_window();

        if let Some(target) = self.hot_key_target(key.scan) {
            if target != state.screen {
                debug!(from = %state.screen, to = %target, key = %key.scan, "hot-key");
            }
            state.screen = target;
        }

        match state.screen {
            Screen::Input => {
                self.handle_input(state, engine, key);
                Flow::Continue
            }
            Screen::Visualize => {
                self.handle_visualize(state, engine, key);
                Flow::Continue
            }
            Screen::Settings => self.handle_settings(key),
        }
    }

    fn handle_input<I: HardwareIo>(
        &self,
        state: &mut AppState,
        engine: &mut ScanEngine<I>,
        key: KeyPress,
    ) {
        match key.scan {
            ScanCode::ENTER => {
                if scan(state, engine) {
                    debug!("scan finished, switching to visualize");
                    state.screen = Screen::Visualize;
                }
            }
            ScanCode::TAB => state.next_field(),
            _ => {
                state.active_field_mut().edit(&key);
            }
        }
    }

    fn handle_visualize<I: HardwareIo>(
        &self,
        state: &mut AppState,
        engine: &mut ScanEngine<I>,
        key: KeyPress,
    ) {
        if matches!(key.ch, Some('r' | 'R')) {
            debug!("rescan requested");
            scan(state, engine);
        }
    }

    fn handle_settings(&self, key: KeyPress) -> Flow {
        if key.scan == ScanCode::ESC {
            debug!("exit requested");
            Flow::Exit
        } else {
            Flow::Continue
        }
    }
}

/// Scan the current window into the state's buffer, recording the outcome.
fn scan<I: HardwareIo>(state: &mut AppState, engine: &mut ScanEngine<I>) -> bool {
    match engine.scan(state.vis.start_port, state.vis.end_port, &mut state.ports) {
        Ok(summary) => {
            state.message = Some(Message::Info(summary.to_string()));
            true
        }
        Err(e) => {
            state.message = Some(Message::Error(e.to_string()));
            false
        }
    }
}
