//! Full-screen visualizer built on crossterm, with a
//! [ratatui](https://github.com/ratatui-org/ratatui) program picker.
//!
//! The UI is organized into these pieces:
//!
//! - **[`app`]**: the session loop, editing the buffer and running it on demand
//! - **[`runner`]**: one complete run of a program against any terminal
//! - **[`visualizer`]**: tape cells, the data pointer frame, the instruction highlight
//! - **[`chrome`]**: panel titles, the empty tape frame, run stats and errors
//! - **[`editor`]**: the code window's line buffer with delta repaints
//! - **[`picker`]**: ratatui list of programs in a directory
//! - **[`layout`]** and **[`theme`]**: where things go and what colour they are
//!
//! Live drawing during a run writes escape sequences at fixed screen positions
//! instead of re-rendering frames, so that guest output stays on screen exactly
//! where the guest put it.

pub mod app;
pub mod chrome;
pub mod editor;
pub mod layout;
pub mod picker;
pub mod runner;
pub mod theme;
pub mod visualizer;

pub use app::App;
pub use layout::ScreenLayout;
