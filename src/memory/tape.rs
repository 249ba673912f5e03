//! Circular byte tape
//!
//! - [`Tape`]: fixed number of `u8` cells plus a data pointer
//!
//! # Wrapping
//!
//! Every operation is total:
//! - cell arithmetic wraps modulo 256
//! - the data pointer wraps modulo the tape length

/// The interpreter's working memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<u8>,
    pointer: usize,
}

impl Tape {
    /// Create a zeroed tape with `size` cells.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero. [`Settings`](crate::settings::Settings) rejects a
    /// zero tape size before an engine is ever built.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "tape must have at least one cell");
        Tape {
            cells: vec![0; size],
            pointer: 0,
        }
    }

    /// Build a tape from existing cell values, pointer at cell 0
    pub fn from_cells(cells: Vec<u8>) -> Self {
        assert!(!cells.is_empty(), "tape must have at least one cell");
        Tape { cells, pointer: 0 }
    }

    pub fn increment(&mut self) {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_add(1);
    }

    pub fn decrement(&mut self) {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_sub(1);
    }

    /// Move the data pointer right, wrapping to cell 0 after the last cell
    pub fn advance(&mut self) {
        self.pointer = if self.pointer + 1 == self.cells.len() {
            0
        } else {
            self.pointer + 1
        };
    }

    /// Move the data pointer left, wrapping to the last cell before cell 0
    pub fn retreat(&mut self) {
        self.pointer = if self.pointer == 0 {
            self.cells.len() - 1
        } else {
            self.pointer - 1
        };
    }

    pub fn read(&self) -> u8 {
        self.cells[self.pointer]
    }

    pub fn write(&mut self, value: u8) {
        self.cells[self.pointer] = value;
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a tape has at least one cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrement_zero_wraps() {
        let mut tape = Tape::new(4);
        tape.decrement();
        assert_eq!(tape.read(), 255);
        tape.increment();
        assert_eq!(tape.read(), 0);
    }

    #[test]
    fn test_pointer_wraps_both_ways() {
        let mut tape = Tape::new(3);
        tape.retreat();
        assert_eq!(tape.pointer(), 2);
        tape.advance();
        assert_eq!(tape.pointer(), 0);
    }

    #[test]
    fn test_write_only_touches_current_cell() {
        let mut tape = Tape::new(3);
        tape.advance();
        tape.write(0x41);
        assert_eq!(tape.cells(), &[0, 0x41, 0]);
    }

    #[test]
    fn test_single_cell_tape() {
        let mut tape = Tape::new(1);
        tape.advance();
        tape.retreat();
        assert_eq!(tape.pointer(), 0);
    }
}
