use ratatui::style::Color;

/// Panel palette, light to dark.
pub const BACKGROUND: Color = Color::Rgb(0xF6, 0xEF, 0xF7);
pub const QUESTION_BG: Color = Color::Rgb(0xD0, 0xD1, 0xE6);
pub const ANSWER_BG: Color = Color::Rgb(0xA6, 0xBD, 0xDB);
pub const ACCENT: Color = Color::Rgb(0x36, 0x90, 0xC0);
pub const HEADER: Color = Color::Rgb(0x02, 0x81, 0x8A);
pub const BORDER: Color = Color::Rgb(0x01, 0x64, 0x50);
pub const TEXT: Color = Color::Rgb(0x1E, 0x1E, 0x2E);
pub const HINT: Color = Color::Rgb(0x67, 0xA9, 0xCF);
pub const DANGER: Color = Color::Rgb(0xC0, 0x39, 0x2B);
