//! Fixed screen positions of the three panels

use crate::settings::Settings;
use crate::vterm::Window;

/// Where everything is drawn, in 1-based screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Top-left corner of the tape frame
    pub memory: (u16, u16),
    /// First character of the first code line
    pub code: (u16, u16),
    /// Guest output window
    pub terminal: Window,
    pub tape_len: usize,
}

/// Screen columns per tape cell: two hex digits and a separator
pub const CELL_WIDTH: usize = 3;

impl ScreenLayout {
    /// Layout for `settings` on a screen of `screen` = (columns, rows)
    pub fn new(settings: &Settings, screen: (u16, u16)) -> Self {
        ScreenLayout {
            memory: settings.memory_origin,
            code: settings.code_origin,
            terminal: settings.terminal_window(screen),
            tape_len: settings.tape_size,
        }
    }

    /// Column of the frame edge to the left of cell `index`
    pub fn cell_edge(&self, index: usize) -> u16 {
        clamp_u16(usize::from(self.memory.0) + CELL_WIDTH * index)
    }

    /// Screen position of the instruction at code-window `(column, row)`
    pub fn code_position(&self, column: usize, row: usize) -> (u16, u16) {
        (
            clamp_u16(usize::from(self.code.0) + column),
            clamp_u16(usize::from(self.code.1) + row),
        )
    }
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
