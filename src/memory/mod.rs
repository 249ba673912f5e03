//! Memory model for the tape machine
//!
//! - [`tape`]: the circular byte tape and its data pointer
//!
//! Cells are unsigned bytes and the tape length is fixed for the lifetime of a run
//! (see [`Settings::tape_size`](crate::settings::Settings::tape_size)).

pub mod tape;

pub use tape::Tape;
