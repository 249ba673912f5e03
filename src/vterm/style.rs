//! SGR style slots for the guest's output

use super::sequence::ControlSequence;

/// What an SGR sequence did to the tracked style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SgrEffect {
    Reset,
    Foreground,
    Background,
    /// Not tracked; the caller forwards the sequence unmodified
    Unrecognized,
}

/// The last foreground and background sequences the guest selected.
///
/// Styles are not left active on the real terminal: every literal the guest prints
/// is wrapped in the stored sequences and followed by a reset, so the visualizer's
/// own drawing never inherits the guest's colours.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleState {
    foreground: Option<Vec<u8>>,
    background: Option<Vec<u8>>,
}

impl StyleState {
    pub fn new() -> Self {
        StyleState::default()
    }

    /// Track an `m` sequence
    pub fn apply(&mut self, seq: &ControlSequence<'_>) -> SgrEffect {
        let numbers = seq.numbers();
        let effect = match numbers.as_slice() {
            [] | [Some(0)] => SgrEffect::Reset,
            [Some(code)] if is_foreground(*code) => SgrEffect::Foreground,
            [Some(code)] if is_background(*code) => SgrEffect::Background,
            [Some(38), _, ..] => SgrEffect::Foreground,
            [Some(48), _, ..] => SgrEffect::Background,
            _ => SgrEffect::Unrecognized,
        };

        match effect {
            SgrEffect::Reset => self.clear(),
            SgrEffect::Foreground => self.foreground = Some(seq.raw().to_vec()),
            SgrEffect::Background => self.background = Some(seq.raw().to_vec()),
            SgrEffect::Unrecognized => {}
        }
        effect
    }

    pub fn clear(&mut self) {
        self.foreground = None;
        self.background = None;
    }

    pub fn is_plain(&self) -> bool {
        self.foreground.is_none() && self.background.is_none()
    }

    pub fn foreground(&self) -> Option<&[u8]> {
        self.foreground.as_deref()
    }

    pub fn background(&self) -> Option<&[u8]> {
        self.background.as_deref()
    }

    /// Append `text` to `out`, wrapped in the active styles and a reset if any
    pub fn wrap(&self, text: &[u8], out: &mut Vec<u8>) {
        if self.is_plain() {
            out.extend_from_slice(text);
            return;
        }
        for slot in [&self.foreground, &self.background].into_iter().flatten() {
            out.extend_from_slice(slot);
        }
        out.extend_from_slice(text);
        out.extend_from_slice(b"\x1b[0m");
    }
}

/// 16-colour foreground codes, default included
fn is_foreground(code: u16) -> bool {
    matches!(code, 30..=37 | 39 | 90..=97)
}

/// 16-colour background codes, default included
fn is_background(code: u16) -> bool {
    matches!(code, 40..=47 | 49 | 100..=107)
}
