//! Runtime error types for the tape machine
//!
//! This module defines [`RunError`], which represents everything that can stop a run:
//! a structurally broken program caught before execution, or a failure of the
//! terminal the run is drawing to and reading from.
//!
//! Tape arithmetic never fails, and unrecognised escape sequences in the guest's
//! output are forwarded rather than reported, so neither appears here.

use crate::terminal::TerminalError;
use std::io;
use thiserror::Error;

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum RunError {
    /// A `[` or `]` without a partner, detected when the bracket table is built
    #[error("Unmatched '{bracket}' at line {line}, column {column}")]
    MalformedProgram {
        bracket: char,
        position: usize,
        line: usize,
        column: usize,
    },

    /// The keyboard stream closed while a `,` was waiting for a byte
    #[error("Input unavailable: the keyboard stream closed")]
    InputUnavailable,

    /// The terminal answered a cursor position query with something unparseable
    #[error("Terminal protocol error: {0}")]
    TerminalProtocol(String),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl RunError {
    /// Whether the run failed before executing a single instruction
    pub fn is_load_error(&self) -> bool {
        matches!(self, RunError::MalformedProgram { .. })
    }
}

impl From<TerminalError> for RunError {
    fn from(err: TerminalError) -> Self {
        match err {
            TerminalError::InputClosed => RunError::InputUnavailable,
            TerminalError::Protocol(reply) => RunError::TerminalProtocol(reply),
            TerminalError::Io(e) => RunError::Io(e),
        }
    }
}
