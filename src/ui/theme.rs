use crossterm::style::Color as TermColor;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub memory_title: Color,   // Yellow
    pub memory_grid: Color,    // Periwinkle
    pub memory_pointer: Color, // Amber
    pub code_title: Color,     // Pink
    pub terminal_title: Color, // Green
    pub programs_title: Color, // Blue
    pub selection_bg: Color,   // Mint
    pub error: Color,          // Red
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    memory_title: Color::Rgb(0xff, 0xd5, 0x41),
    memory_grid: Color::Rgb(0x84, 0x9b, 0xe4),
    memory_pointer: Color::Rgb(0xff, 0xc4, 0x00),
    code_title: Color::Rgb(0xe8, 0x6a, 0x9b),
    terminal_title: Color::Rgb(0x59, 0xc1, 0x35),
    programs_title: Color::Rgb(0x24, 0x9f, 0xde),
    selection_bg: Color::Rgb(0xa6, 0xfc, 0xdb),
    error: Color::Rgb(243, 139, 168),
};

/// The same colour for raw crossterm output
pub fn term_color(color: Color) -> TermColor {
    match color {
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        Color::Black => TermColor::Black,
        _ => TermColor::Reset,
    }
}
