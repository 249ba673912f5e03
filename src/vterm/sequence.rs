//! Complete control sequences as accumulated from the guest's output

/// Sequences longer than this without a final byte are flushed as-is
pub const MAX_SEQUENCE_LEN: usize = 32;

/// Whether `byte` ends a control sequence.
///
/// Anything above `@` ends it except the bracket bytes, which the introducer uses.
pub fn is_final_byte(byte: u8) -> bool {
    byte > b'@' && byte != b'[' && byte != b']'
}

/// A complete `ESC [ params final` sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSequence<'a> {
    raw: &'a [u8],
}

impl<'a> ControlSequence<'a> {
    /// Wrap accumulated bytes; `None` unless they start with `ESC [` and end in a
    /// final byte
    pub fn new(raw: &'a [u8]) -> Option<Self> {
        match raw {
            [0x1b, b'[', .., last] if is_final_byte(*last) => Some(ControlSequence { raw }),
            _ => None,
        }
    }

    pub fn raw(&self) -> &'a [u8] {
        self.raw
    }

    pub fn final_byte(&self) -> u8 {
        self.raw[self.raw.len() - 1]
    }

    /// The bytes between the introducer and the final byte
    pub fn params(&self) -> &'a [u8] {
        &self.raw[2..self.raw.len() - 1]
    }

    /// Numeric parameter `index`; `None` when missing, empty, or not a number
    pub fn param(&self, index: usize) -> Option<u16> {
        let part = self.params().split(|&b| b == b';').nth(index)?;
        parse_number(part)
    }

    /// All parameters, each `None` when empty or not a number
    pub fn numbers(&self) -> Vec<Option<u16>> {
        if self.params().is_empty() {
            return Vec::new();
        }
        self.params().split(|&b| b == b';').map(parse_number).collect()
    }

    /// Distance for relative cursor moves: missing, zero or unparseable means 1
    pub fn distance(&self) -> u16 {
        self.param(0).unwrap_or(1).max(1)
    }
}

fn parse_number(part: &[u8]) -> Option<u16> {
    if part.is_empty() || !part.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let value = part
        .iter()
        .fold(0u32, |acc, &d| acc.saturating_mul(10).saturating_add(u32::from(d - b'0')));
    Some(value.min(u32::from(u16::MAX)) as u16)
}
