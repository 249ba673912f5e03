//! Terminal I/O adapter
//!
//! Everything the rest of the crate needs from the real terminal goes through the
//! [`TerminalIo`] trait: read a key, ask whether one is waiting, query the cursor,
//! write raw bytes. Implementations:
//!
//! - [`CrosstermTerminal`]: the real terminal, via crossterm
//! - [`scripted::ScriptedTerminal`]: in-memory, for tests and headless runs
//!
//! Keyboard capture itself is a separate capability ([`keys::KeySource`]) so the
//! blocking and polling strategies can be swapped at startup.

pub mod crossterm_io;
pub mod keys;
pub mod scripted;

pub use crossterm_io::CrosstermTerminal;
pub use keys::Key;

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("input stream closed")]
    InputClosed,

    #[error("malformed cursor position report: {0}")]
    Protocol(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// The primitives the engine, visualizer and virtual terminal are built on
pub trait TerminalIo {
    /// Block until a key is pressed
    fn read_key(&mut self) -> Result<Key, TerminalError>;

    /// Whether a key can be read without blocking
    fn key_available(&mut self) -> Result<bool, TerminalError>;

    /// Real cursor position as 1-based `(column, row)`.
    ///
    /// Anything written so far is flushed first so the answer reflects it.
    fn cursor_position(&mut self) -> Result<(u16, u16), TerminalError>;

    fn write_raw(&mut self, bytes: &[u8]) -> Result<(), TerminalError>;

    fn flush(&mut self) -> Result<(), TerminalError>;
}

/// Build a batch of output with crossterm commands and write it in one go
pub fn emit<T, F>(io: &mut T, build: F) -> Result<(), TerminalError>
where
    T: TerminalIo + ?Sized,
    F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
{
    let mut buf = Vec::new();
    build(&mut buf)?;
    io.write_raw(&buf)
}

/// Parse a device status report reply (`ESC [ row ; col R`) into `(column, row)`.
///
/// Bytes before the ESC are junk left in the input queue and are skipped.
pub fn parse_cursor_report(reply: &[u8]) -> Result<(u16, u16), TerminalError> {
    let malformed = || TerminalError::Protocol(String::from_utf8_lossy(reply).into_owned());

    let start = reply.iter().position(|&b| b == 0x1b).ok_or_else(malformed)?;
    let body = reply[start + 1..]
        .strip_prefix(b"[")
        .ok_or_else(malformed)?;
    let end = body.iter().position(|&b| b == b'R').ok_or_else(malformed)?;

    let text = std::str::from_utf8(&body[..end]).map_err(|_| malformed())?;
    let (row, col) = text.split_once(';').ok_or_else(malformed)?;
    let row: u16 = row.parse().map_err(|_| malformed())?;
    let col: u16 = col.parse().map_err(|_| malformed())?;

    Ok((col, row))
}
