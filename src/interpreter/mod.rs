//! Tape machine execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the fetch-decode-execute loop and its state machine
//! - [`errors`]: errors that abort a run
//! - [`lines`]: the line-index table locating the instruction pointer on screen
//! - [`stats`]: instruction counting and input-excluding timing
//!
//! # Execution Model
//!
//! [`engine::Engine::step`] executes exactly one instruction and reports its side
//! effect as a [`engine::StepEvent`]. A `,` suspends the engine in
//! [`engine::EngineState::AwaitingInput`] until the caller supplies a byte, so the
//! engine itself never touches the keyboard or the screen.

pub mod engine;
pub mod errors;
pub mod lines;
pub mod stats;

pub use engine::{Engine, EngineState, Step, StepEvent};
pub use errors::RunError;
pub use stats::RunStats;
