//! Program files: discovery and loading

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// File extensions recognised as loadable programs
pub const PROGRAM_EXTENSIONS: &[&str] = &["bf", "b"];

/// Tabs are expanded to this many spaces on load
pub const TAB_WIDTH: usize = 4;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Cannot read program '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Cannot list directory '{}': {source}", path.display())]
    List { path: PathBuf, source: io::Error },
}

/// A program as displayed in the code window: one string per line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSource {
    pub path: Option<PathBuf>,
    pub lines: Vec<String>,
}

impl ProgramSource {
    /// An empty, unnamed program with a single blank line
    pub fn empty() -> Self {
        ProgramSource {
            path: None,
            lines: vec![String::new()],
        }
    }

    /// Build from in-memory text, expanding tabs and splitting into lines
    pub fn from_text(text: &str) -> Self {
        let expanded = text.replace('\t', &" ".repeat(TAB_WIDTH));
        ProgramSource {
            path: None,
            lines: expanded.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let text = fs::read_to_string(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut program = ProgramSource::from_text(&text);
        program.path = Some(path.to_path_buf());
        info!(path = %path.display(), lines = program.lines.len(), "loaded program");
        Ok(program)
    }
}

/// Whether `path` has one of the program extensions
pub fn is_program(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PROGRAM_EXTENSIONS.contains(&ext))
}

/// Program files directly inside `dir`, sorted by name
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let list_err = |source| SourceError::List {
        path: dir.to_path_buf(),
        source,
    };

    let mut programs = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let path = entry.map_err(list_err)?.path();
        if path.is_file() && is_program(&path) {
            programs.push(path);
        }
    }
    programs.sort();

    debug!(dir = %dir.display(), found = programs.len(), "discovered programs");
    Ok(programs)
}
