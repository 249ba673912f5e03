//! Live redraws of the tape and the instruction pointer
//!
//! Nothing here repaints a panel. Each call writes only the few characters that
//! changed:
//!
//! - a cell: two hex digits, dimmed to the grid colour when zero
//! - the data pointer: a box frame around the active cell, or the plain grid
//!   frame when erasing it (edge glyphs at either end of the tape)
//! - the instruction pointer: one highlighted character, later rewritten plain

use super::layout::ScreenLayout;
use super::theme::{term_color, DEFAULT_THEME};
use crate::interpreter::engine::Step;
use crate::terminal::{emit, TerminalError, TerminalIo};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};

/// An instruction glyph currently drawn highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub x: u16,
    pub y: u16,
    pub glyph: char,
}

pub struct Visualizer {
    layout: ScreenLayout,
}

impl Visualizer {
    pub fn new(layout: ScreenLayout) -> Self {
        Visualizer { layout }
    }

    pub fn draw_cell<T: TerminalIo + ?Sized>(
        &self,
        io: &mut T,
        index: usize,
        value: u8,
    ) -> Result<(), TerminalError> {
        // 0-based: one column right of the cell's left edge, one row below the top
        let (x, y) = (self.layout.cell_edge(index), self.layout.memory.1);
        let grid = term_color(DEFAULT_THEME.memory_grid);

        emit(io, |buf| {
            queue!(buf, MoveTo(x, y))?;
            if value == 0 {
                queue!(buf, SetForegroundColor(grid))?;
            }
            queue!(buf, Print(format!("{:02x}", value)), ResetColor)
        })
    }

    /// Frame the cell at `index` in the pointer colour
    pub fn draw_pointer<T: TerminalIo + ?Sized>(
        &self,
        io: &mut T,
        index: usize,
    ) -> Result<(), TerminalError> {
        let rows = frame_rows(index, self.layout.tape_len, true);
        self.draw_frame(io, index, rows, term_color(DEFAULT_THEME.memory_pointer))
    }

    /// Restore the plain grid around the cell at `index`
    pub fn erase_pointer<T: TerminalIo + ?Sized>(
        &self,
        io: &mut T,
        index: usize,
    ) -> Result<(), TerminalError> {
        let rows = frame_rows(index, self.layout.tape_len, false);
        self.draw_frame(io, index, rows, term_color(DEFAULT_THEME.memory_grid))
    }

    fn draw_frame<T: TerminalIo + ?Sized>(
        &self,
        io: &mut T,
        index: usize,
        (top, bottom): (String, String),
        color: Color,
    ) -> Result<(), TerminalError> {
        let x = self.layout.cell_edge(index).saturating_sub(1);
        let y = self.layout.memory.1.saturating_sub(1);

        emit(io, |buf| {
            queue!(
                buf,
                SetForegroundColor(color),
                MoveTo(x, y),
                Print(top),
                MoveTo(x, y + 1),
                Print('│'),
                MoveTo(x + 3, y + 1),
                Print('│'),
                MoveTo(x, y + 2),
                Print(bottom),
                ResetColor
            )
        })
    }

    /// Draw the instruction of `step` highlighted; newlines have nothing to draw
    pub fn highlight<T: TerminalIo + ?Sized>(
        &self,
        io: &mut T,
        step: &Step,
    ) -> Result<Option<Highlight>, TerminalError> {
        if step.glyph.is_control() {
            return Ok(None);
        }

        let (x, y) = self
            .layout
            .code_position(step.location.column, step.location.row);
        let bg = term_color(DEFAULT_THEME.code_title);

        emit(io, |buf| {
            queue!(
                buf,
                MoveTo(x.saturating_sub(1), y.saturating_sub(1)),
                SetForegroundColor(Color::Black),
                SetBackgroundColor(bg),
                Print(step.glyph),
                ResetColor
            )
        })?;

        Ok(Some(Highlight {
            x,
            y,
            glyph: step.glyph,
        }))
    }

    /// Rewrite a highlighted glyph without the highlight
    pub fn unhighlight<T: TerminalIo + ?Sized>(
        &self,
        io: &mut T,
        highlight: Highlight,
    ) -> Result<(), TerminalError> {
        emit(io, |buf| {
            queue!(
                buf,
                MoveTo(highlight.x.saturating_sub(1), highlight.y.saturating_sub(1)),
                Print(highlight.glyph)
            )
        })
    }
}

/// Top and bottom rows of the frame around cell `index`.
///
/// The active frame is a closed box; the inactive one joins its neighbours with
/// tees, except at the ends of the tape where it meets the outer corners.
pub fn frame_rows(index: usize, tape_len: usize, active: bool) -> (String, String) {
    if active {
        return ("╭──╮".to_string(), "╰──╯".to_string());
    }

    let (left_top, left_bottom) = if index == 0 { ('╭', '╰') } else { ('┬', '┴') };
    let (right_top, right_bottom) = if index + 1 == tape_len {
        ('╮', '╯')
    } else {
        ('┬', '┴')
    };

    (
        format!("{}──{}", left_top, right_top),
        format!("{}──{}", left_bottom, right_bottom),
    )
}
