//! Program chooser shown when a directory is opened

use crate::terminal::{Key, TerminalError, TerminalIo};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, List, ListItem, ListState},
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of a key press in the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    Moved,
    Chosen(usize),
    Cancelled,
    Ignored,
}

/// Selection state over a list of program files
pub struct Picker<'a> {
    programs: &'a [PathBuf],
    state: ListState,
}

impl<'a> Picker<'a> {
    pub fn new(programs: &'a [PathBuf]) -> Self {
        let mut state = ListState::default();
        if !programs.is_empty() {
            state.select(Some(0));
        }
        Picker { programs, state }
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Up and Down wrap around the ends of the list
    pub fn handle_key(&mut self, key: Key) -> PickerAction {
        let len = self.programs.len();
        match (key, self.state.selected()) {
            (Key::Esc | Key::Interrupt, _) => PickerAction::Cancelled,
            (Key::Enter, Some(i)) => PickerAction::Chosen(i),
            (Key::Up, Some(i)) => {
                self.state.select(Some((i + len - 1) % len));
                PickerAction::Moved
            }
            (Key::Down, Some(i)) => {
                self.state.select(Some((i + 1) % len));
                PickerAction::Moved
            }
            _ => PickerAction::Ignored,
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let title = Span::styled(
            " programs ",
            Style::default()
                .bg(DEFAULT_THEME.programs_title)
                .fg(Color::Black),
        );
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(DEFAULT_THEME.programs_title));

        let items: Vec<ListItem> = self
            .programs
            .iter()
            .map(|path| ListItem::new(display_name(path)))
            .collect();

        let list = List::new(items)
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.fg))
            .highlight_style(
                Style::default()
                    .bg(DEFAULT_THEME.selection_bg)
                    .fg(Color::Black),
            );

        frame.render_stateful_widget(list, frame.area(), &mut self.state);
    }

    /// Draw and read keys until a program is chosen or the picker is dismissed
    pub fn run<B: Backend, T: TerminalIo + ?Sized>(
        &mut self,
        terminal: &mut Terminal<B>,
        io: &mut T,
    ) -> Result<Option<PathBuf>, TerminalError> {
        loop {
            terminal.draw(|f| self.render(f))?;

            match self.handle_key(io.read_key()?) {
                PickerAction::Chosen(i) => {
                    info!(program = %self.programs[i].display(), "program chosen");
                    return Ok(Some(self.programs[i].clone()));
                }
                PickerAction::Cancelled => return Ok(None),
                PickerAction::Moved | PickerAction::Ignored => {}
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
