//! Line-index table for locating the instruction pointer on screen

/// Row/column of an instruction inside the code window, both zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodeLocation {
    pub column: usize,
    pub row: usize,
}

/// Positions of the newlines that lie before the instruction pointer, in order.
///
/// The table is maintained incrementally: newlines are pushed as the instruction
/// pointer walks (or jumps) forward over them and popped as a backward jump
/// crosses them again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    pub fn new() -> Self {
        LineIndex::default()
    }

    /// Record a newline the instruction pointer moved forward over
    pub fn push(&mut self, position: usize) {
        debug_assert!(self.newlines.last().map_or(true, |&last| last < position));
        self.newlines.push(position);
    }

    /// Forget the most recent newline after a backward jump crossed it
    pub fn pop(&mut self) -> Option<usize> {
        self.newlines.pop()
    }

    /// Index of the first instruction on the current line
    pub fn line_start(&self) -> usize {
        self.newlines.last().map_or(0, |&nl| nl + 1)
    }

    /// Screen location of the instruction at `position`
    pub fn locate(&self, position: usize) -> CodeLocation {
        CodeLocation {
            column: position - self.line_start(),
            row: self.newlines.len(),
        }
    }

    pub fn positions(&self) -> &[usize] {
        &self.newlines
    }
}
