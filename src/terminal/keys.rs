//! Keyboard capture
//!
//! [`KeySource`] is the single capability the rest of the crate uses to read keys.
//! Two implementations exist and one is chosen at startup from [`InputMode`]:
//!
//! - [`BlockingKeys`]: parks in `crossterm::event::read` until an event arrives
//! - [`PollingKeys`]: repeatedly polls with a short timeout, for consoles where a
//!   blocking read misbehaves

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

/// A keystroke, reduced to what the editor and the `,` instruction care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Tab,
    Esc,
    Up,
    Down,
    Left,
    Right,
    /// Ctrl-C; raw mode delivers it as a key instead of a signal
    Interrupt,
}

impl Key {
    /// Translate a crossterm key event; releases and unsupported keys give `None`
    pub fn from_event(event: KeyEvent) -> Option<Key> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        let key = match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Key::Interrupt
            }
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Tab => Key::Tab,
            KeyCode::Esc => Key::Esc,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            _ => return None,
        };
        Some(key)
    }

    /// The byte a `,` instruction stores for this key, if any.
    ///
    /// Characters map to their Latin-1 code; anything beyond U+00FF has no byte.
    pub fn input_byte(self) -> Option<u8> {
        match self {
            Key::Char(c) => u8::try_from(u32::from(c)).ok(),
            Key::Enter => Some(b'\n'),
            Key::Tab => Some(b'\t'),
            Key::Backspace => Some(0x08),
            Key::Esc => Some(0x1b),
            Key::Interrupt => Some(0x03),
            Key::Up | Key::Down | Key::Left | Key::Right => None,
        }
    }
}

/// Source of keystrokes
pub trait KeySource {
    /// Block until the next key
    fn next_key(&mut self) -> io::Result<Key>;

    /// Whether an input event is already queued
    fn has_key(&mut self) -> io::Result<bool> {
        event::poll(Duration::ZERO)
    }
}

/// Which [`KeySource`] to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Blocking,
    Polling,
}

impl InputMode {
    /// Polling on Windows consoles, blocking reads everywhere else
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            InputMode::Polling
        } else {
            InputMode::Blocking
        }
    }

    pub fn key_source(self) -> Box<dyn KeySource> {
        match self {
            InputMode::Blocking => Box::new(BlockingKeys),
            InputMode::Polling => Box::new(PollingKeys::default()),
        }
    }
}

impl Default for InputMode {
    fn default() -> Self {
        InputMode::platform_default()
    }
}

#[derive(Debug, Default)]
pub struct BlockingKeys;

impl KeySource for BlockingKeys {
    fn next_key(&mut self) -> io::Result<Key> {
        loop {
            if let Event::Key(event) = event::read()? {
                if let Some(key) = Key::from_event(event) {
                    return Ok(key);
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct PollingKeys {
    interval: Duration,
}

impl PollingKeys {
    pub fn new(interval: Duration) -> Self {
        PollingKeys { interval }
    }
}

impl Default for PollingKeys {
    fn default() -> Self {
        PollingKeys::new(Duration::from_millis(10))
    }
}

impl KeySource for PollingKeys {
    fn next_key(&mut self) -> io::Result<Key> {
        loop {
            if !event::poll(self.interval)? {
                continue;
            }
            if let Event::Key(event) = event::read()? {
                if let Some(key) = Key::from_event(event) {
                    return Ok(key);
                }
            }
        }
    }
}
