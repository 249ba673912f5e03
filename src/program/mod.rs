//! Programs and their static structure
//!
//! - [`source`]: finding program files, loading them, tab expansion, display lines
//! - [`brackets`]: loop bracket pairing, checked before any instruction runs
//!
//! # Instructions
//!
//! | char | meaning |
//! |------|---------|
//! | `+` / `-` | increment / decrement the current cell |
//! | `>` / `<` | move the data pointer right / left |
//! | `.` / `,` | output / input one byte |
//! | `[` / `]` | loop while the current cell is non-zero |
//!
//! Every other character, newlines included, is a no-op that is kept so the code
//! window can show the program exactly as written.

pub mod brackets;
pub mod source;

pub use brackets::{BracketTable, JumpStrategy};
pub use source::ProgramSource;

/// A decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Increment,
    Decrement,
    Right,
    Left,
    Output,
    Input,
    LoopStart,
    LoopEnd,
    Newline,
    Other(char),
}

impl Instruction {
    pub fn decode(c: char) -> Self {
        match c {
            '+' => Instruction::Increment,
            '-' => Instruction::Decrement,
            '>' => Instruction::Right,
            '<' => Instruction::Left,
            '.' => Instruction::Output,
            ',' => Instruction::Input,
            '[' => Instruction::LoopStart,
            ']' => Instruction::LoopEnd,
            '\n' => Instruction::Newline,
            other => Instruction::Other(other),
        }
    }

    /// Whether executing this counts towards the instruction total
    pub fn is_counted(self) -> bool {
        !matches!(self, Instruction::Newline | Instruction::Other(_))
    }
}
