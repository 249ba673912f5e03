//! Run-time configuration and command-line parsing

use crate::program::JumpStrategy;
use crate::terminal::keys::InputMode;
use crate::vterm::Window;
use std::path::PathBuf;
use thiserror::Error;

/// Cells on the tape unless `--tape-size` says otherwise
pub const DEFAULT_TAPE_SIZE: usize = 64;

/// Top-left corner of the tape frame
pub const DEFAULT_MEMORY_ORIGIN: (u16, u16) = (2, 2);

/// First character of the first code line
pub const DEFAULT_CODE_ORIGIN: (u16, u16) = (3, 7);

/// Top-left corner of the guest output window
pub const DEFAULT_TERMINAL_ORIGIN: (u16, u16) = (104, 7);

pub const USAGE: &str = "\
Usage: tapetty [PATH] [OPTIONS]

PATH is a program file to open, or a directory to pick one from
(default: the current directory).

Options:
  --tape-size N     number of memory cells (default 64)
  --window WxH      size of the output window (default: rest of the screen)
  --poll            read keys by polling
  --blocking        read keys with blocking reads
  --scan-jumps      resolve loops by rescanning instead of the bracket table
  --log FILE        write a trace log to FILE (filter with RUST_LOG)
  -h, --help        show this help

Keys: ` runs the program, Esc quits.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Invalid value '{value}' for {flag}")]
    InvalidValue { flag: String, value: String },

    #[error("Unknown option '{0}'")]
    UnknownOption(String),

    #[error("The tape needs at least one cell")]
    EmptyTape,
}

/// Everything configurable about a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tape_size: usize,
    pub memory_origin: (u16, u16),
    pub code_origin: (u16, u16),
    pub terminal_origin: (u16, u16),
    /// Output window size; `None` fills the rest of the screen
    pub terminal_size: Option<(u16, u16)>,
    pub jump_strategy: JumpStrategy,
    pub input_mode: InputMode,
    /// Program file, or directory to pick one from
    pub program_path: PathBuf,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tape_size: DEFAULT_TAPE_SIZE,
            memory_origin: DEFAULT_MEMORY_ORIGIN,
            code_origin: DEFAULT_CODE_ORIGIN,
            terminal_origin: DEFAULT_TERMINAL_ORIGIN,
            terminal_size: None,
            jump_strategy: JumpStrategy::default(),
            input_mode: InputMode::platform_default(),
            program_path: PathBuf::from("."),
            log_file: None,
        }
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Settings),
    Help,
}

impl Settings {
    /// Parse arguments, not including the program name
    pub fn from_args<I>(args: I) -> Result<Command, SettingsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut settings = Settings::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "--tape-size" => {
                    let value = value_for(&arg, args.next())?;
                    let size: usize = value.parse().map_err(|_| invalid(&arg, &value))?;
                    if size == 0 {
                        return Err(SettingsError::EmptyTape);
                    }
                    settings.tape_size = size;
                }
                "--window" => {
                    let value = value_for(&arg, args.next())?;
                    settings.terminal_size =
                        Some(parse_size(&value).ok_or_else(|| invalid(&arg, &value))?);
                }
                "--poll" => settings.input_mode = InputMode::Polling,
                "--blocking" => settings.input_mode = InputMode::Blocking,
                "--scan-jumps" => settings.jump_strategy = JumpStrategy::Scan,
                "--log" => {
                    settings.log_file = Some(PathBuf::from(value_for(&arg, args.next())?));
                }
                flag if flag.starts_with('-') => {
                    return Err(SettingsError::UnknownOption(flag.to_string()));
                }
                path => settings.program_path = PathBuf::from(path),
            }
        }

        Ok(Command::Run(settings))
    }

    /// The guest output window on a screen of `screen` = (columns, rows)
    pub fn terminal_window(&self, screen: (u16, u16)) -> Window {
        let (x, y) = self.terminal_origin;
        let (width, height) = self.terminal_size.unwrap_or_else(|| {
            (
                screen.0.saturating_sub(x).saturating_add(1),
                screen.1.saturating_sub(y).saturating_add(1),
            )
        });
        Window::new(x, y, width, height)
    }
}

fn value_for(flag: &str, value: Option<String>) -> Result<String, SettingsError> {
    value.ok_or_else(|| SettingsError::MissingValue(flag.to_string()))
}

fn invalid(flag: &str, value: &str) -> SettingsError {
    SettingsError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    }
}

fn parse_size(value: &str) -> Option<(u16, u16)> {
    let (w, h) = value.split_once(['x', 'X'])?;
    let (w, h): (u16, u16) = (w.parse().ok()?, h.parse().ok()?);
    (w > 0 && h > 0).then_some((w, h))
}
