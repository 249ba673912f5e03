//! Loop bracket matching
//!
//! Two ways of resolving a jump are provided and must always agree on where the
//! instruction pointer lands:
//!
//! - [`BracketTable`]: every pair resolved once when the program is loaded
//! - [`scan_match`]: the naive outward scan with a depth counter, run per jump
//!
//! [`BracketTable::build`] is always run before execution, even when jumps are
//! resolved by scanning, so an unmatched bracket is reported as
//! [`RunError::MalformedProgram`] instead of scanning off the end of the program.

use crate::interpreter::errors::RunError;
use crate::interpreter::lines::LineIndex;
use rustc_hash::FxHashMap;

/// How the engine resolves `[` / `]` jumps at run time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpStrategy {
    /// Look the partner up in the table built at load time
    #[default]
    Precomputed,
    /// Rescan outward from the bracket on every jump
    Scan,
}

/// Position → partner position for every bracket in a program
#[derive(Debug, Clone, Default)]
pub struct BracketTable {
    pairs: FxHashMap<usize, usize>,
}

impl BracketTable {
    /// Pair every bracket in `code`, failing on the first unmatched one
    pub fn build(code: &[char]) -> Result<Self, RunError> {
        let mut pairs = FxHashMap::default();
        let mut open: Vec<usize> = Vec::new();

        for (pos, &c) in code.iter().enumerate() {
            match c {
                '[' => open.push(pos),
                ']' => {
                    let start = open.pop().ok_or_else(|| malformed(code, pos))?;
                    pairs.insert(start, pos);
                    pairs.insert(pos, start);
                }
                _ => {}
            }
        }

        if let Some(&unmatched) = open.first() {
            return Err(malformed(code, unmatched));
        }

        Ok(BracketTable { pairs })
    }

    /// Partner of the bracket at `position`, or `None` if it is not a bracket
    pub fn partner(&self, position: usize) -> Option<usize> {
        self.pairs.get(&position).copied()
    }

    /// Number of bracket pairs
    pub fn len(&self) -> usize {
        self.pairs.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Find the partner of the bracket at `position` by scanning outward.
///
/// Newlines crossed on the way are pushed onto `lines` when scanning forward and
/// popped when scanning backward, so the table still describes the line the
/// instruction pointer lands on.
pub fn scan_match(code: &[char], position: usize, lines: &mut LineIndex) -> Option<usize> {
    let mut depth = 1usize;
    let mut pos = position;

    match code.get(position)? {
        '[' => {
            while depth > 0 {
                pos += 1;
                match code.get(pos)? {
                    '[' => depth += 1,
                    ']' => depth -= 1,
                    '\n' => lines.push(pos),
                    _ => {}
                }
            }
        }
        ']' => {
            while depth > 0 {
                pos = pos.checked_sub(1)?;
                match code[pos] {
                    '[' => depth -= 1,
                    ']' => depth += 1,
                    '\n' => {
                        lines.pop();
                    }
                    _ => {}
                }
            }
        }
        _ => return None,
    }

    Some(pos)
}

fn malformed(code: &[char], position: usize) -> RunError {
    let before = &code[..position];
    let line = before.iter().filter(|&&c| c == '\n').count() + 1;
    let line_start = before
        .iter()
        .rposition(|&c| c == '\n')
        .map_or(0, |nl| nl + 1);

    RunError::MalformedProgram {
        bracket: code[position],
        position,
        line,
        column: position - line_start + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_nested_pairs() {
        let code = chars("+[>[-]<]");
        let table = BracketTable::build(&code).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.partner(1), Some(7));
        assert_eq!(table.partner(7), Some(1));
        assert_eq!(table.partner(3), Some(5));
        assert_eq!(table.partner(0), None);
    }

    #[test]
    fn test_unmatched_close_reports_location() {
        let code = chars("+\n+]");
        match BracketTable::build(&code) {
            Err(RunError::MalformedProgram {
                bracket,
                position,
                line,
                column,
            }) => {
                assert_eq!(bracket, ']');
                assert_eq!(position, 3);
                assert_eq!(line, 2);
                assert_eq!(column, 2);
            }
            other => panic!("Expected MalformedProgram, got {:?}", other),
        }
    }

    #[test]
    fn test_unmatched_open_is_outermost() {
        let code = chars("[[]");
        match BracketTable::build(&code) {
            Err(RunError::MalformedProgram { position, .. }) => assert_eq!(position, 0),
            other => panic!("Expected MalformedProgram, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_tracks_newlines() {
        let code = chars("[\n+\n]+");
        let mut lines = LineIndex::new();

        assert_eq!(scan_match(&code, 0, &mut lines), Some(4));
        assert_eq!(lines.positions(), &[1, 3]);

        assert_eq!(scan_match(&code, 4, &mut lines), Some(0));
        assert!(lines.positions().is_empty());
    }

    #[test]
    fn test_scan_on_non_bracket() {
        let mut lines = LineIndex::new();
        assert_eq!(scan_match(&chars("+"), 0, &mut lines), None);
    }
}
