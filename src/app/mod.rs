//! Interactive application: state, key handling and the event loop.
//!
//! The loop owns the [`AppState`] and hands exclusive access to exactly one
//! handler per key press. Nothing runs between key presses.

mod field;
mod machine;
mod state;

pub use field::{is_hex_key, InputField, MAX_FIELD_LEN};
pub use machine::{Flow, ScreenStateMachine};
pub use state::{AppState, FieldId, HotKey, Message, Screen, VisConfig, FIELD_COUNT, HOT_KEYS};

use crate::config::Settings;
use crate::render::{self, CellWriter, SystemInfo, View};
use crate::scanner::{HardwareIo, ScanEngine};
use crate::types::KeyPress;
use std::collections::VecDeque;
use std::io;
use tracing::{debug, info};

/// What a keyboard source delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyPress),
    /// The display changed size; the current frame must be drawn again.
    Resize,
}

/// Source of key presses.
pub trait KeyboardSource {
    /// Block until the next event. `None` means the source is exhausted.
    fn next_event(&mut self) -> io::Result<Option<InputEvent>>;
}

/// A fixed sequence of input events.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    events: VecDeque<InputEvent>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = KeyPress>) -> Self {
        Self::with_events(keys.into_iter().map(InputEvent::Key))
    }

    pub fn with_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl KeyboardSource for ScriptedKeys {
    fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        Ok(self.events.pop_front())
    }
}

/// How the event loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The user quit from the settings screen.
    Quit,
    /// The keyboard source ran dry.
    InputClosed,
}

/// The interactive application.
pub struct App<I> {
    state: AppState,
    engine: ScanEngine<I>,
    machine: ScreenStateMachine,
}

impl<I: HardwareIo> App<I> {
    pub fn new(settings: &Settings, io: I) -> Self {
        Self {
            state: AppState::new(settings),
            engine: ScanEngine::new(io),
            machine: ScreenStateMachine::new(),
        }
    }

    /// Start with `message` on the message line.
    pub fn with_message(mut self, message: Message) -> Self {
        self.state.message = Some(message);
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn engine(&self) -> &ScanEngine<I> {
        &self.engine
    }

    /// Current frame contents.
    pub fn view(&self) -> View {
        let info = SystemInfo {
            backend: self.engine.io().name(),
            privileged: self.engine.io().requires_privileges(),
            reserved_ranges: self.engine.classifier().ranges().len(),
        };
        View::build(&self.state, &info)
    }

    /// Process a single key press.
    pub fn handle_key(&mut self, key: KeyPress) -> Flow {
        self.machine.handle(&mut self.state, &mut self.engine, key)
    }

    /// Run until the user quits or `keys` is exhausted.
    ///
    /// A frame is drawn before every blocking read, so the screen always
    /// reflects the state after the previous key.
    pub fn run<K, W>(&mut self, keys: &mut K, screen: &mut W) -> io::Result<Exit>
    where
        K: KeyboardSource + ?Sized,
        W: CellWriter + ?Sized,
    {
        info!(backend = self.engine.io().name(), "event loop started");
        loop {
            render::draw(screen, &self.view())?;

            let key = match keys.next_event()? {
                Some(InputEvent::Key(key)) => key,
                Some(InputEvent::Resize) => {
                    debug!("display resized, redrawing");
                    continue;
                }
                None => {
                    debug!("keyboard source closed");
                    return Ok(Exit::InputClosed);
                }
            };

            if self.handle_key(key) == Flow::Exit {
                screen.clear()?;
                screen.present()?;
                info!(scans = self.engine.scans(), "exiting");
                return Ok(Exit::Quit);
            }
        }
    }
}
