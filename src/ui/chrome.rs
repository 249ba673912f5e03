//! Static panel drawing: titles, the empty tape frame, the code listing

use super::layout::ScreenLayout;
use super::theme::{term_color, DEFAULT_THEME};
use crate::interpreter::stats::RunStats;
use crate::terminal::{emit, TerminalError, TerminalIo};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use ratatui::style::Color as ThemeColor;
use std::io::{self, Write};

const MEMORY_TITLE: &str = "memory";
const CODE_TITLE: &str = "code";
const TERMINAL_TITLE: &str = "terminal";

/// Clear the screen and draw every panel for a fresh run
pub fn draw_screen<T: TerminalIo + ?Sized>(
    io: &mut T,
    layout: &ScreenLayout,
    lines: &[String],
) -> Result<(), TerminalError> {
    let (mx, my) = layout.memory;
    let (cx, cy) = layout.code;
    let (tx, ty) = (layout.terminal.left(), layout.terminal.top());
    let (top, middle, bottom) = tape_rows(layout.tape_len);
    let grid = term_color(DEFAULT_THEME.memory_grid);

    emit(io, |buf| {
        queue!(buf, Clear(ClearType::All))?;

        title(buf, mx + 1, my, MEMORY_TITLE, DEFAULT_THEME.memory_title)?;
        queue!(
            buf,
            SetForegroundColor(grid),
            MoveTo(mx.saturating_sub(1), my.saturating_sub(1)),
            Print(top),
            MoveTo(mx.saturating_sub(1), my),
            Print(middle),
            MoveTo(mx.saturating_sub(1), my + 1),
            Print(bottom),
            ResetColor
        )?;

        title(buf, cx, cy, CODE_TITLE, DEFAULT_THEME.code_title)?;
        for (row, line) in (cy.saturating_sub(1)..).zip(lines) {
            queue!(buf, MoveTo(cx.saturating_sub(1), row), Print(line))?;
        }

        title(buf, tx, ty, TERMINAL_TITLE, DEFAULT_THEME.terminal_title)
    })
}

/// Report a finished run next to the terminal title
pub fn draw_stats<T: TerminalIo + ?Sized>(
    io: &mut T,
    layout: &ScreenLayout,
    stats: &RunStats,
) -> Result<(), TerminalError> {
    status_line(io, layout, &stats.to_string(), DEFAULT_THEME.terminal_title)
}

/// Report a failed run next to the terminal title
pub fn draw_error<T: TerminalIo + ?Sized>(
    io: &mut T,
    layout: &ScreenLayout,
    message: &str,
) -> Result<(), TerminalError> {
    status_line(io, layout, message, DEFAULT_THEME.error)
}

fn status_line<T: TerminalIo + ?Sized>(
    io: &mut T,
    layout: &ScreenLayout,
    text: &str,
    color: ThemeColor,
) -> Result<(), TerminalError> {
    // One space after the " terminal " title
    let x = layout.terminal.left() + TERMINAL_TITLE.len() as u16 + 3;
    let y = layout.terminal.top().saturating_sub(1);

    emit(io, |buf| {
        queue!(
            buf,
            MoveTo(x.saturating_sub(1), y.saturating_sub(1)),
            SetForegroundColor(term_color(color)),
            Print(text),
            ResetColor,
            Clear(ClearType::UntilNewLine)
        )
    })
}

/// Black title text on a coloured tab, on the row above `(x, y)`
fn title(buf: &mut impl Write, x: u16, y: u16, text: &str, bg: ThemeColor) -> io::Result<()> {
    queue!(
        buf,
        MoveTo(x.saturating_sub(1), y.saturating_sub(2)),
        SetBackgroundColor(term_color(bg)),
        SetForegroundColor(Color::Black),
        Print(format!(" {} ", text)),
        ResetColor
    )
}

/// The three rows of an all-zero tape frame
pub fn tape_rows(len: usize) -> (String, String, String) {
    let mut top = String::from("╭");
    let mut middle = String::from("│");
    let mut bottom = String::from("╰");

    for i in 0..len {
        let last = i + 1 == len;
        top.push_str(if last { "──╮" } else { "──┬" });
        middle.push_str("00│");
        bottom.push_str(if last { "──╯" } else { "──┴" });
    }

    (top, middle, bottom)
}
