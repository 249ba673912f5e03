//! Line-buffer editor for the code window
//!
//! Edits change the buffer first and remember which rows they touched; the
//! rows are then repainted in place, each padded with spaces to the width that
//! was on screen before so shortened lines leave nothing behind. Nothing to the
//! right of the code is ever cleared, since the output window shares its rows.

use crate::program::source::{ProgramSource, TAB_WIDTH};
use crate::terminal::{emit, Key, TerminalError, TerminalIo};
use crossterm::cursor::{MoveTo, Show};
use crossterm::queue;
use crossterm::style::Print;
use std::ops::Range;

/// Key that runs the buffer
pub const RUN_KEY: char = '`';

/// What a key did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Edited,
    Moved,
    Run,
    Quit,
    Ignored,
}

pub struct Editor {
    lines: Vec<String>,
    /// Cursor line
    row: usize,
    /// Cursor position within the line, in characters
    col: usize,
    /// Screen position of the first character of the first line
    origin: (u16, u16),
    /// Width in characters of what is currently drawn on each row
    painted: Vec<usize>,
    /// Rows changed since the last repaint
    dirty: Option<Range<usize>>,
}

impl Editor {
    /// Open `source` with the cursor after its last character
    pub fn new(source: ProgramSource, origin: (u16, u16)) -> Self {
        let mut lines = source.lines;
        if lines.is_empty() {
            lines.push(String::new());
        }
        let row = lines.len() - 1;
        let col = lines[row].chars().count();

        Editor {
            lines,
            row,
            col,
            origin,
            painted: Vec::new(),
            dirty: None,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Cursor as (column, line), both zero-based
    pub fn cursor(&self) -> (usize, usize) {
        (self.col, self.row)
    }

    pub fn handle_key(&mut self, key: Key) -> EditorAction {
        match key {
            Key::Char(RUN_KEY) => EditorAction::Run,
            Key::Esc | Key::Interrupt => EditorAction::Quit,
            Key::Char(c) => {
                self.insert(&c.to_string());
                EditorAction::Edited
            }
            Key::Tab => {
                self.insert(&" ".repeat(TAB_WIDTH));
                EditorAction::Edited
            }
            Key::Enter => {
                self.split_line();
                EditorAction::Edited
            }
            Key::Backspace => self.backspace(),
            Key::Left => self.move_horizontal(-1),
            Key::Right => self.move_horizontal(1),
            Key::Up => self.move_vertical(-1),
            Key::Down => self.move_vertical(1),
        }
    }

    fn insert(&mut self, text: &str) {
        let at = byte_index(&self.lines[self.row], self.col);
        self.lines[self.row].insert_str(at, text);
        self.col += text.chars().count();
        self.touch(self.row..self.row + 1);
    }

    fn split_line(&mut self) {
        let at = byte_index(&self.lines[self.row], self.col);
        let rest = self.lines[self.row].split_off(at);
        self.lines.insert(self.row + 1, rest);
        self.touch(self.row..self.lines.len());
        self.row += 1;
        self.col = 0;
    }

    fn backspace(&mut self) -> EditorAction {
        if self.col > 0 {
            let at = byte_index(&self.lines[self.row], self.col - 1);
            self.lines[self.row].remove(at);
            self.col -= 1;
            self.touch(self.row..self.row + 1);
            EditorAction::Edited
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            let old_len = self.lines.len() + 1;
            self.row -= 1;
            self.col = self.lines[self.row].chars().count();
            self.lines[self.row].push_str(&line);
            self.touch(self.row..old_len);
            EditorAction::Edited
        } else {
            EditorAction::Ignored
        }
    }

    fn move_horizontal(&mut self, delta: isize) -> EditorAction {
        let len = self.lines[self.row].chars().count();
        match delta {
            -1 if self.col > 0 => self.col -= 1,
            -1 if self.row > 0 => {
                self.row -= 1;
                self.col = self.lines[self.row].chars().count();
            }
            1 if self.col < len => self.col += 1,
            1 if self.row + 1 < self.lines.len() => {
                self.row += 1;
                self.col = 0;
            }
            _ => return EditorAction::Ignored,
        }
        EditorAction::Moved
    }

    fn move_vertical(&mut self, delta: isize) -> EditorAction {
        let Some(row) = self.row.checked_add_signed(delta) else {
            return EditorAction::Ignored;
        };
        if row >= self.lines.len() {
            return EditorAction::Ignored;
        }
        self.row = row;
        self.col = self.col.min(self.lines[row].chars().count());
        EditorAction::Moved
    }

    fn touch(&mut self, rows: Range<usize>) {
        self.dirty = Some(match self.dirty.take() {
            Some(dirty) => dirty.start.min(rows.start)..dirty.end.max(rows.end),
            None => rows,
        });
    }

    /// Record that every line was just drawn as-is (after a full panel redraw)
    pub fn mark_painted(&mut self) {
        self.painted = self.lines.iter().map(|line| line.chars().count()).collect();
        self.dirty = None;
    }

    /// Repaint the rows changed since the last repaint
    pub fn repaint<T: TerminalIo + ?Sized>(&mut self, io: &mut T) -> Result<(), TerminalError> {
        let Some(rows) = self.dirty.take() else {
            return Ok(());
        };
        let (x, y) = (self.origin.0.saturating_sub(1), self.origin.1.saturating_sub(1));
        let end = rows.end.max(self.lines.len());
        let mut painted = Vec::with_capacity(self.lines.len());

        let mut buf = Vec::new();
        for row in 0..end {
            let line = self.lines.get(row).map_or("", String::as_str);
            let width = line.chars().count();
            let old = self.painted.get(row).copied().unwrap_or(0);

            if rows.contains(&row) {
                let screen_row = y.saturating_add(u16::try_from(row).unwrap_or(u16::MAX));
                let pad = " ".repeat(old.saturating_sub(width));
                queue!(buf, MoveTo(x, screen_row), Print(line), Print(pad))?;
            }
            if row < self.lines.len() {
                painted.push(if rows.contains(&row) { width } else { old });
            }
        }
        self.painted = painted;

        io.write_raw(&buf)
    }

    /// Show the terminal cursor at the editing position
    pub fn place_cursor<T: TerminalIo + ?Sized>(&self, io: &mut T) -> Result<(), TerminalError> {
        let x = self
            .origin
            .0
            .saturating_add(u16::try_from(self.col).unwrap_or(u16::MAX))
            .saturating_sub(1);
        let y = self
            .origin
            .1
            .saturating_add(u16::try_from(self.row).unwrap_or(u16::MAX))
            .saturating_sub(1);

        emit(io, |buf| queue!(buf, MoveTo(x, y), Show))?;
        io.flush()
    }
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map_or(line.len(), |(i, _)| i)
}
