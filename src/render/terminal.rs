//! crossterm backend: draws cells and reads keys.

use crate::app::{InputEvent, KeyboardSource};
use crate::render::{CellWriter, ColorClass};
use crate::types::{KeyPress, ScanCode};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Colors, Print, ResetColor, SetColors};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};

/// Map a CGA colour nibble to a terminal colour.
fn cga_color(nibble: u8) -> Color {
    match nibble & 0x0F {
        0x0 => Color::Black,
        0x1 => Color::DarkBlue,
        0x2 => Color::DarkGreen,
        0x3 => Color::DarkCyan,
        0x4 => Color::DarkRed,
        0x5 => Color::DarkMagenta,
        0x6 => Color::DarkYellow,
        0x7 => Color::Grey,
        0x8 => Color::DarkGrey,
        0x9 => Color::Blue,
        0xA => Color::Green,
        0xB => Color::Cyan,
        0xC => Color::Red,
        0xD => Color::Magenta,
        0xE => Color::Yellow,
        _ => Color::White,
    }
}

fn colors(class: ColorClass) -> Colors {
    let attr = class.attribute();
    Colors::new(cga_color(attr & 0x0F), cga_color(attr >> 4))
}

/// Translate a crossterm key event into a key press.
///
/// Returns `None` for releases, modified characters and keys the
/// application has no use for.
pub fn key_from_crossterm(key: KeyEvent) -> Option<KeyPress> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Esc => Some(KeyPress::esc()),
        KeyCode::Enter => Some(KeyPress::enter()),
        KeyCode::Tab => Some(KeyPress::tab()),
        KeyCode::Backspace => Some(KeyPress::backspace()),
        KeyCode::F(n) => ScanCode::function(n).map(KeyPress::scan),
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(KeyPress::char(ch))
        }
        _ => None,
    }
}

/// The interactive terminal.
///
/// Entering switches to raw mode on the alternate screen; dropping the value
/// restores the terminal.
pub struct Terminal {
    out: Stdout,
}

impl Terminal {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(Self { out })
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

impl CellWriter for Terminal {
    fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, Clear(ClearType::All))
    }

    fn put(&mut self, x: u16, y: u16, glyph: char, color: ColorClass) -> io::Result<()> {
        queue!(self.out, MoveTo(x, y), SetColors(colors(color)), Print(glyph))
    }

    fn present(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}

/// Keyboard input from the terminal.
///
/// Only meaningful while a [`Terminal`] is active, which puts the terminal
/// in raw mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalKeys;

/// Translate a crossterm event. Mouse, focus and paste events are dropped.
pub fn input_from_crossterm(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => key_from_crossterm(key).map(InputEvent::Key),
        Event::Resize(..) => Some(InputEvent::Resize),
        _ => None,
    }
}

impl KeyboardSource for TerminalKeys {
    /// Block until the next usable key press or resize.
    fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        loop {
            if let Some(input) = input_from_crossterm(event::read()?) {
                return Ok(Some(input));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_function_keys_map_to_scan_codes() {
        assert_eq!(
            key_from_crossterm(key(KeyCode::F(1), KeyModifiers::NONE)),
            Some(KeyPress::scan(ScanCode::F1))
        );
        assert_eq!(
            key_from_crossterm(key(KeyCode::F(10), KeyModifiers::NONE)),
            Some(KeyPress::scan(ScanCode::F10))
        );
        assert_eq!(key_from_crossterm(key(KeyCode::F(12), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_editing_keys() {
        assert_eq!(
            key_from_crossterm(key(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(KeyPress::backspace())
        );
        assert_eq!(
            key_from_crossterm(key(KeyCode::Enter, KeyModifiers::NONE)).map(|k| k.scan),
            Some(ScanCode::ENTER)
        );
        assert_eq!(
            key_from_crossterm(key(KeyCode::Char('R'), KeyModifiers::SHIFT)),
            Some(KeyPress::char('R'))
        );
        assert_eq!(
            key_from_crossterm(key(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_releases_ignored() {
        let mut event = key(KeyCode::Esc, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(key_from_crossterm(event), None);
    }

    #[test]
    fn test_resize_requests_redraw() {
        assert_eq!(
            input_from_crossterm(Event::Resize(100, 40)),
            Some(InputEvent::Resize)
        );
        assert_eq!(
            input_from_crossterm(Event::Key(key(KeyCode::Tab, KeyModifiers::NONE))),
            Some(InputEvent::Key(KeyPress::tab()))
        );
        assert_eq!(input_from_crossterm(Event::FocusGained), None);
    }

    #[test]
    fn test_cga_colors() {
        let highlight = colors(ColorClass::Highlight);
        assert_eq!(highlight.foreground, Some(Color::Black));
        assert_eq!(highlight.background, Some(Color::Grey));
        assert_eq!(colors(ColorClass::Active).foreground, Some(Color::Green));
    }
}
