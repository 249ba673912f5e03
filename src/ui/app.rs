//! Interactive session: edit the program, run it, repeat

use super::chrome;
use super::editor::{Editor, EditorAction};
use super::layout::ScreenLayout;
use super::runner::run_program;
use crate::interpreter::errors::RunError;
use crate::interpreter::stats::RunStats;
use crate::program::source::ProgramSource;
use crate::program::JumpStrategy;
use crate::terminal::{emit, Key, TerminalIo};
use crossterm::cursor::Hide;
use crossterm::queue;
use tracing::{debug, warn};

/// The main application state
pub struct App<T: TerminalIo> {
    io: T,
    layout: ScreenLayout,
    strategy: JumpStrategy,
    editor: Editor,

    /// Stats of the most recent successful run
    pub last_run: Option<RunStats>,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl<T: TerminalIo> App<T> {
    pub fn new(
        io: T,
        layout: ScreenLayout,
        strategy: JumpStrategy,
        program: ProgramSource,
    ) -> Self {
        App {
            editor: Editor::new(program, layout.code),
            io,
            layout,
            strategy,
            last_run: None,
            should_quit: false,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn io(&self) -> &T {
        &self.io
    }

    /// Run the program once, then hand the keyboard to the editor until quit
    pub fn run(&mut self) -> Result<(), RunError> {
        self.execute()?;

        while !self.should_quit {
            let key = self.io.read_key()?;
            self.handle_key(key)?;
        }

        Ok(())
    }

    fn handle_key(&mut self, key: Key) -> Result<(), RunError> {
        match self.editor.handle_key(key) {
            EditorAction::Run => self.execute()?,
            EditorAction::Quit => self.should_quit = true,
            EditorAction::Edited | EditorAction::Moved => {
                // Typed-ahead or pasted keys are drawn together once the queue drains
                if !self.io.key_available()? {
                    self.editor.repaint(&mut self.io)?;
                    self.editor.place_cursor(&mut self.io)?;
                }
            }
            EditorAction::Ignored => debug!(?key, "key ignored"),
        }
        Ok(())
    }

    /// Run the current buffer; a bad program or cursor report is shown, not fatal
    fn execute(&mut self) -> Result<(), RunError> {
        emit(&mut self.io, |buf| queue!(buf, Hide))?;

        match run_program(&mut self.io, &self.layout, self.editor.lines(), self.strategy) {
            Ok(stats) => self.last_run = Some(stats),
            Err(err @ (RunError::MalformedProgram { .. } | RunError::TerminalProtocol(_))) => {
                warn!(error = %err, "run failed");
                chrome::draw_error(&mut self.io, &self.layout, &err.to_string())?;
            }
            Err(err) => return Err(err),
        }

        self.editor.mark_painted();
        self.editor.place_cursor(&mut self.io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::terminal::scripted::ScriptedTerminal;

    fn app(text: &str, keys: Vec<Key>) -> App<ScriptedTerminal> {
        let layout = ScreenLayout::new(&Settings::default(), (200, 50));
        App::new(
            ScriptedTerminal::with_keys(keys),
            layout,
            JumpStrategy::default(),
            ProgramSource::from_text(text),
        )
    }

    #[test]
    fn test_edit_then_rerun() {
        let mut app = app("+", vec![Key::Char('+'), Key::Char('`'), Key::Esc]);
        app.run().unwrap();

        assert!(app.should_quit);
        assert_eq!(app.editor().lines(), &["++".to_string()]);
        assert_eq!(app.last_run.map(|s| s.instructions), Some(2));
    }

    #[test]
    fn test_queued_edits_repaint_once() {
        let keys = vec![Key::Char('+'), Key::Char('-'), Key::Char('>')];
        let mut app = app("", keys);
        assert!(matches!(app.run(), Err(RunError::InputUnavailable)));

        let output = app.io().output_string();
        // Code row 7, column 3: the chrome, the cursor, then a single repaint
        assert_eq!(output.matches("\x1b[7;3H").count(), 3);
        assert!(output.contains("\x1b[7;3H+->"));
    }

    #[test]
    fn test_malformed_program_is_reported() {
        let mut app = app("[", vec![Key::Interrupt]);
        app.run().unwrap();

        assert!(app.last_run.is_none());
        assert!(app.io().output_string().contains("Unmatched '['"));
    }

    #[test]
    fn test_closed_input_ends_session() {
        let mut app = app("", vec![]);
        assert!(matches!(app.run(), Err(RunError::InputUnavailable)));
    }
}
