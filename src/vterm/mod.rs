//! Virtual terminal output engine
//!
//! The guest program prints one byte per `.` instruction. Those bytes are not sent
//! to the real terminal directly: [`VirtualTerminal`] recognises the control
//! sequences the guest emits and rewrites every cursor movement relative to a
//! [`Window`], so the guest can never move the visible cursor outside it.
//!
//! - [`window`]: the confining rectangle
//! - [`sequence`]: accumulated `ESC [` sequences and their parameters
//! - [`style`]: the two tracked SGR slots
//!
//! # Parser states
//!
//! ```text
//! Normal ──ESC──▶ EscapeStart ──'['──▶ Accumulating ──final byte──▶ Normal
//!                     │                      (dispatch)
//!                     └──other: ESC emitted literally, byte handled as Normal
//! ```
//!
//! # Rewrites
//!
//! | final | guest meaning | sent to the real terminal |
//! |-------|---------------|---------------------------|
//! | `A` `B` `C` `D` | relative move | unchanged, or clamped to the crossed edge |
//! | `E` `F` | next / previous line | move plus return to the left edge, clamped |
//! | `G` `d` | absolute column / row | offset by the window origin |
//! | `H` `f` | absolute position | offset by the window origin |
//! | `m` | style | tracked in [`StyleState`], untracked codes forwarded |
//! | other | | forwarded unmodified |

pub mod sequence;
pub mod style;
pub mod window;

pub use sequence::ControlSequence;
pub use style::{SgrEffect, StyleState};
pub use window::Window;

use crate::interpreter::errors::RunError;
use crate::terminal::{emit, TerminalIo};
use crossterm::cursor::{
    Hide, MoveDown, MoveTo, MoveToColumn, MoveToRow, MoveUp, RestorePosition, SavePosition, Show,
};
use crossterm::queue;
use sequence::{is_final_byte, MAX_SEQUENCE_LEN};
use tracing::trace;

const ESC: u8 = 0x1b;
const BACKSPACE: u8 = 0x08;
const VERTICAL_TAB: u8 = 0x0b;
const FORM_FEED: u8 = 0x0c;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    Normal,
    /// An ESC was seen
    EscapeStart,
    /// Inside `ESC [`, waiting for the final byte
    Accumulating,
}

/// Output engine state for one run
#[derive(Debug)]
pub struct VirtualTerminal {
    window: Window,
    state: ParseState,
    pending: Vec<u8>,
    styles: StyleState,
    /// Set by a line break; the next `\r` or `\n` is swallowed
    just_broke: bool,
}

impl VirtualTerminal {
    pub fn new(window: Window) -> Self {
        VirtualTerminal {
            window,
            state: ParseState::Normal,
            pending: Vec::with_capacity(MAX_SEQUENCE_LEN),
            styles: StyleState::new(),
            just_broke: false,
        }
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn styles(&self) -> &StyleState {
        &self.styles
    }

    /// Put the output cursor at the window origin and remember it
    pub fn begin<T: TerminalIo + ?Sized>(&mut self, io: &mut T) -> Result<(), RunError> {
        let (x, y) = (self.window.left().saturating_sub(1), self.window.top().saturating_sub(1));
        emit(io, |buf| queue!(buf, MoveTo(x, y), SavePosition))?;
        Ok(())
    }

    /// Handle one guest byte between restoring and saving the output cursor.
    ///
    /// The visualizer moves the real cursor around between `.` instructions; the
    /// saved position is where the guest's own cursor really is.
    pub fn write_byte<T: TerminalIo + ?Sized>(
        &mut self,
        byte: u8,
        io: &mut T,
    ) -> Result<(), RunError> {
        emit(io, |buf| queue!(buf, RestorePosition))?;
        self.feed(byte, io)?;
        emit(io, |buf| queue!(buf, SavePosition))?;
        Ok(())
    }

    /// Show the cursor at the guest's position while a `,` waits for a key
    pub fn show_input_cursor<T: TerminalIo + ?Sized>(&self, io: &mut T) -> Result<(), RunError> {
        emit(io, |buf| queue!(buf, RestorePosition, Show))?;
        io.flush()?;
        Ok(())
    }

    /// Undo [`show_input_cursor`](Self::show_input_cursor)
    pub fn hide_input_cursor<T: TerminalIo + ?Sized>(&self, io: &mut T) -> Result<(), RunError> {
        emit(io, |buf| queue!(buf, Hide, SavePosition))?;
        Ok(())
    }

    /// Run one byte through the parser, writing whatever it produces
    pub fn feed<T: TerminalIo + ?Sized>(&mut self, byte: u8, io: &mut T) -> Result<(), RunError> {
        match self.state {
            ParseState::Normal => self.feed_normal(byte, io),
            ParseState::EscapeStart if byte == b'[' => {
                self.pending.clear();
                self.pending.extend_from_slice(&[ESC, b'[']);
                self.state = ParseState::Accumulating;
                Ok(())
            }
            ParseState::EscapeStart => {
                // Not a control sequence after all
                self.state = ParseState::Normal;
                io.write_raw(&[ESC])?;
                self.feed_normal(byte, io)
            }
            ParseState::Accumulating => {
                self.pending.push(byte);
                if is_final_byte(byte) {
                    self.state = ParseState::Normal;
                    let pending = std::mem::take(&mut self.pending);
                    let result = self.dispatch(&pending, io);
                    self.pending = pending;
                    self.pending.clear();
                    result
                } else if self.pending.len() >= MAX_SEQUENCE_LEN {
                    self.state = ParseState::Normal;
                    io.write_raw(&self.pending)?;
                    self.pending.clear();
                    Ok(())
                } else {
                    Ok(())
                }
            }
        }
    }

    fn feed_normal<T: TerminalIo + ?Sized>(
        &mut self,
        byte: u8,
        io: &mut T,
    ) -> Result<(), RunError> {
        match byte {
            b'\r' | b'\n' => {
                if self.just_broke {
                    self.just_broke = false;
                    return Ok(());
                }
                self.line_break(io)?;
                self.just_broke = true;
                Ok(())
            }
            // The real terminal would scroll or leave the window
            VERTICAL_TAB | FORM_FEED => {
                trace!(byte, "dropped vertical control");
                Ok(())
            }
            ESC => {
                self.state = ParseState::EscapeStart;
                Ok(())
            }
            b'\t' => {
                self.just_broke = false;
                let (col, _) = io.cursor_position()?;
                // Tab stops every eight screen columns, starting at column 1
                let stop = (col.saturating_sub(1) / 8 + 1).saturating_mul(8).saturating_add(1);
                if stop > self.window.right() {
                    trace!(stop, "clamped tab to window edge");
                    let right = self.window.right().saturating_sub(1);
                    emit(io, |buf| queue!(buf, MoveToColumn(right)))?;
                } else {
                    io.write_raw(b"\t")?;
                }
                Ok(())
            }
            BACKSPACE => {
                self.just_broke = false;
                let (col, _) = io.cursor_position()?;
                if col > self.window.left() {
                    io.write_raw(&[BACKSPACE])?;
                }
                Ok(())
            }
            _ => {
                self.just_broke = false;
                let mut utf8 = [0u8; 2];
                // Bytes above ASCII print as their Latin-1 character
                let text = char::from(byte).encode_utf8(&mut utf8).as_bytes();
                let mut out = Vec::with_capacity(16);
                self.styles.wrap(text, &mut out);
                io.write_raw(&out)?;
                Ok(())
            }
        }
    }

    /// Next row, back at the window's left edge; the bottom row is never left
    fn line_break<T: TerminalIo + ?Sized>(&mut self, io: &mut T) -> Result<(), RunError> {
        let (_, row) = io.cursor_position()?;
        let left = self.window.left().saturating_sub(1);
        if row >= self.window.bottom() {
            emit(io, |buf| queue!(buf, MoveToColumn(left)))?;
        } else {
            emit(io, |buf| queue!(buf, MoveDown(1), MoveToColumn(left)))?;
        }
        Ok(())
    }

    fn dispatch<T: TerminalIo + ?Sized>(&mut self, raw: &[u8], io: &mut T) -> Result<(), RunError> {
        let Some(seq) = ControlSequence::new(raw) else {
            io.write_raw(raw)?;
            return Ok(());
        };

        let window = self.window;
        let (left, top) = (window.left().saturating_sub(1), window.top().saturating_sub(1));
        let (right, bottom) = (window.right().saturating_sub(1), window.bottom().saturating_sub(1));

        match seq.final_byte() {
            b'A' => {
                let (_, row) = io.cursor_position()?;
                if u32::from(row) < u32::from(window.top()) + u32::from(seq.distance()) {
                    clamped(&seq);
                    emit(io, |buf| queue!(buf, MoveToRow(top)))?;
                } else {
                    io.write_raw(seq.raw())?;
                }
            }
            b'B' => {
                let (_, row) = io.cursor_position()?;
                if u32::from(row) + u32::from(seq.distance()) > u32::from(window.bottom()) {
                    clamped(&seq);
                    emit(io, |buf| queue!(buf, MoveToRow(bottom)))?;
                } else {
                    io.write_raw(seq.raw())?;
                }
            }
            b'C' => {
                let (col, _) = io.cursor_position()?;
                if u32::from(col) + u32::from(seq.distance()) > u32::from(window.right()) {
                    clamped(&seq);
                    emit(io, |buf| queue!(buf, MoveToColumn(right)))?;
                } else {
                    io.write_raw(seq.raw())?;
                }
            }
            b'D' => {
                let (col, _) = io.cursor_position()?;
                if u32::from(col) < u32::from(window.left()) + u32::from(seq.distance()) {
                    clamped(&seq);
                    emit(io, |buf| queue!(buf, MoveToColumn(left)))?;
                } else {
                    io.write_raw(seq.raw())?;
                }
            }
            b'E' => {
                let distance = seq.distance();
                let (_, row) = io.cursor_position()?;
                if u32::from(row) + u32::from(distance) > u32::from(window.bottom()) {
                    clamped(&seq);
                    emit(io, |buf| queue!(buf, MoveTo(left, bottom)))?;
                } else {
                    emit(io, |buf| queue!(buf, MoveDown(distance), MoveToColumn(left)))?;
                }
            }
            b'F' => {
                let distance = seq.distance();
                let (_, row) = io.cursor_position()?;
                if u32::from(row) < u32::from(window.top()) + u32::from(distance) {
                    clamped(&seq);
                    emit(io, |buf| queue!(buf, MoveTo(left, top)))?;
                } else {
                    emit(io, |buf| queue!(buf, MoveUp(distance), MoveToColumn(left)))?;
                }
            }
            b'G' => {
                let col = window.column(seq.param(0).unwrap_or(1)).saturating_sub(1);
                emit(io, |buf| queue!(buf, MoveToColumn(col)))?;
            }
            b'd' => {
                let row = window.row(seq.param(0).unwrap_or(1)).saturating_sub(1);
                emit(io, |buf| queue!(buf, MoveToRow(row)))?;
            }
            b'H' | b'f' => {
                let row = window.row(seq.param(0).unwrap_or(1)).saturating_sub(1);
                let col = window.column(seq.param(1).unwrap_or(1)).saturating_sub(1);
                emit(io, |buf| queue!(buf, MoveTo(col, row)))?;
            }
            b'm' => {
                if self.styles.apply(&seq) == SgrEffect::Unrecognized {
                    io.write_raw(seq.raw())?;
                }
            }
            _ => io.write_raw(seq.raw())?,
        }
        Ok(())
    }
}

fn clamped(seq: &ControlSequence<'_>) {
    trace!(
        sequence = %String::from_utf8_lossy(&seq.raw()[1..]),
        "clamped cursor move to window edge"
    );
}
