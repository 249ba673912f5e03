//! The real terminal, driven through crossterm

use super::keys::{InputMode, Key, KeySource};
use super::{TerminalError, TerminalIo};
use crossterm::{
    cursor::{self, Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, BufWriter, Stdout, Write};
use tracing::warn;

/// Terminal adapter over a writer (normally buffered stdout) and a key source
pub struct CrosstermTerminal<W: Write = BufWriter<Stdout>> {
    out: W,
    keys: Box<dyn KeySource>,
}

impl CrosstermTerminal {
    /// Adapter over buffered stdout
    pub fn stdout(mode: InputMode) -> Self {
        CrosstermTerminal::new(BufWriter::new(io::stdout()), mode.key_source())
    }
}

impl<W: Write> CrosstermTerminal<W> {
    pub fn new(out: W, keys: Box<dyn KeySource>) -> Self {
        CrosstermTerminal { out, keys }
    }
}

impl<W: Write> TerminalIo for CrosstermTerminal<W> {
    fn read_key(&mut self) -> Result<Key, TerminalError> {
        self.keys.next_key().map_err(input_error)
    }

    fn key_available(&mut self) -> Result<bool, TerminalError> {
        self.keys.has_key().map_err(input_error)
    }

    fn cursor_position(&mut self) -> Result<(u16, u16), TerminalError> {
        self.out.flush()?;
        // crossterm reports 0-based (column, row) and fails if no well-formed
        // reply arrives in time
        let (col, row) = cursor::position().map_err(|e| {
            warn!(error = %e, "cursor position query failed");
            TerminalError::Protocol(e.to_string())
        })?;
        Ok((col + 1, row + 1))
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<(), TerminalError> {
        self.out.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TerminalError> {
        self.out.flush()?;
        Ok(())
    }
}

fn input_error(err: io::Error) -> TerminalError {
    match err.kind() {
        io::ErrorKind::UnexpectedEof | io::ErrorKind::BrokenPipe => TerminalError::InputClosed,
        _ => TerminalError::Io(err),
    }
}

/// Raw, no-echo input on the alternate screen with the cursor hidden
pub fn enter_screen() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, Hide)
}

/// Undo [`enter_screen`]: primary screen, visible cursor, cooked input
pub fn restore_screen() -> io::Result<()> {
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()
}
