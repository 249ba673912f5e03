//! In-memory terminal for tests and headless runs
//!
//! Keys are replayed from a queue, the cursor position query is answered with a
//! scripted device status report, and every written byte is recorded.

use super::{parse_cursor_report, Key, TerminalError, TerminalIo};
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    output: Vec<u8>,
    keys: VecDeque<Key>,
    cursor_reply: Vec<u8>,
    queries: usize,
}

impl ScriptedTerminal {
    /// A terminal whose cursor reports (1, 1) and which has no keys queued
    pub fn new() -> Self {
        let mut term = ScriptedTerminal::default();
        term.set_cursor(1, 1);
        term
    }

    pub fn with_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        let mut term = ScriptedTerminal::new();
        term.keys.extend(keys);
        term
    }

    /// Answer future cursor queries with the 1-based `(column, row)`
    pub fn set_cursor(&mut self, column: u16, row: u16) {
        self.cursor_reply = format!("\x1b[{};{}R", row, column).into_bytes();
    }

    /// Answer future cursor queries with arbitrary bytes
    pub fn set_cursor_reply(&mut self, reply: &[u8]) {
        self.cursor_reply = reply.to_vec();
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn output_string(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Number of cursor position queries answered
    pub fn queries(&self) -> usize {
        self.queries
    }
}

impl TerminalIo for ScriptedTerminal {
    fn read_key(&mut self) -> Result<Key, TerminalError> {
        self.keys.pop_front().ok_or(TerminalError::InputClosed)
    }

    fn key_available(&mut self) -> Result<bool, TerminalError> {
        Ok(!self.keys.is_empty())
    }

    fn cursor_position(&mut self) -> Result<(u16, u16), TerminalError> {
        self.queries += 1;
        parse_cursor_report(&self.cursor_reply)
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<(), TerminalError> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TerminalError> {
        Ok(())
    }
}
