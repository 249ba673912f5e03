//! # Introduction
//!
//! tapetty runs programs for the eight-instruction tape machine
//! (`+ - > < . , [ ]`) while drawing every step: the memory tape with its data
//! pointer, the code with the current instruction highlighted, and the
//! program's own output in a window of the real terminal.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Bracket table → Engine → Step events → Visualizer / Virtual terminal
//! ```
//!
//! 1. [`program`]: loads program files and pairs loop brackets.
//! 2. [`interpreter`]: executes one instruction at a time and reports what it
//!    changed as a [`interpreter::StepEvent`].
//! 3. [`memory`]: the circular byte [`memory::Tape`].
//! 4. [`vterm`]: confines the program's output, escape sequences included, to
//!    its window on screen.
//! 5. [`terminal`]: the I/O adapter over crossterm, plus a scripted one for tests.
//! 6. [`ui`]: panels, live redraws, the line editor and the program picker; not
//!    part of the stable library API.
//!
//! [`settings`] and [`logging`] hold the command-line configuration and the
//! optional trace log.

pub mod interpreter;
pub mod logging;
pub mod memory;
pub mod program;
pub mod settings;
pub mod terminal;
pub mod ui;
pub mod vterm;
