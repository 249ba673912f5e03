//! The sub-rectangle of the real screen the guest program writes into

/// A window in 1-based screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Window {
    /// Zero sizes are widened to 1 and a zero origin is moved to 1
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Window {
            x: x.max(1),
            y: y.max(1),
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn left(&self) -> u16 {
        self.x
    }

    pub fn top(&self) -> u16 {
        self.y
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width.saturating_sub(1))
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height.saturating_sub(1))
    }

    /// Screen column for the window-relative column `column` (1-based, clamped)
    pub fn column(&self, column: u16) -> u16 {
        self.x.saturating_add(column.clamp(1, self.width.max(1)) - 1)
    }

    /// Screen row for the window-relative row `row` (1-based, clamped)
    pub fn row(&self, row: u16) -> u16 {
        self.y.saturating_add(row.clamp(1, self.height.max(1)) - 1)
    }
}
