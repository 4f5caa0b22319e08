// Theme support for the TUI
//
// Provides color palettes selectable via config file.
// "auto" uses terminal's ANSI palette, named themes use true color (RGB).

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub highlight: Color,
    pub title: Color,

    // Calendar colors
    pub weekday_header: Color,
    pub today: Color,
    pub non_month_day: Color,
    pub past_day: Color,
    pub overflow_summary: Color,

    // Event accent colors
    pub event_blue: Color,
    pub event_red: Color,
    pub event_green: Color,

    // Status line
    pub status_bar: Color,

    /// Border style for modal frames
    pub border_type: BorderType,
}

impl Theme {
    /// Load theme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dracula" => Self::dracula(),
            "nord" => Self::nord(),
            "gruvbox" => Self::gruvbox(),
            _ => Self::auto(), // "auto" or unknown
        }
    }

    /// Auto theme - uses terminal's ANSI palette
    pub fn auto() -> Self {
        Self {
            name: "auto".to_string(),
            background: Color::Reset,
            foreground: Color::White,
            border: Color::White,
            highlight: Color::Yellow,
            title: Color::Cyan,
            weekday_header: Color::Cyan,
            today: Color::Yellow,
            non_month_day: Color::DarkGray,
            past_day: Color::Gray,
            overflow_summary: Color::Magenta,
            event_blue: Color::Blue,
            event_red: Color::Red,
            event_green: Color::Green,
            status_bar: Color::Green,
            border_type: BorderType::Rounded,
        }
    }

    /// Dracula theme
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            background: Color::Rgb(0x28, 0x2a, 0x36),
            foreground: Color::Rgb(0xf8, 0xf8, 0xf2),
            border: Color::Rgb(0x62, 0x72, 0xa4),
            highlight: Color::Rgb(0xf1, 0xfa, 0x8c),
            title: Color::Rgb(0x8b, 0xe9, 0xfd),
            weekday_header: Color::Rgb(0xbd, 0x93, 0xf9),
            today: Color::Rgb(0xf1, 0xfa, 0x8c),
            non_month_day: Color::Rgb(0x44, 0x47, 0x5a),
            past_day: Color::Rgb(0x62, 0x72, 0xa4),
            overflow_summary: Color::Rgb(0xff, 0x79, 0xc6),
            event_blue: Color::Rgb(0x62, 0x72, 0xa4),
            event_red: Color::Rgb(0xff, 0x55, 0x55),
            event_green: Color::Rgb(0x50, 0xfa, 0x7b),
            status_bar: Color::Rgb(0x50, 0xfa, 0x7b),
            border_type: BorderType::Rounded,
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            background: Color::Rgb(0x2e, 0x34, 0x40),
            foreground: Color::Rgb(0xec, 0xef, 0xf4),
            border: Color::Rgb(0x4c, 0x56, 0x6a),
            highlight: Color::Rgb(0xeb, 0xcb, 0x8b),
            title: Color::Rgb(0x88, 0xc0, 0xd0),
            weekday_header: Color::Rgb(0x81, 0xa1, 0xc1),
            today: Color::Rgb(0xeb, 0xcb, 0x8b),
            non_month_day: Color::Rgb(0x3b, 0x42, 0x52),
            past_day: Color::Rgb(0x4c, 0x56, 0x6a),
            overflow_summary: Color::Rgb(0xb4, 0x8e, 0xad),
            event_blue: Color::Rgb(0x5e, 0x81, 0xac),
            event_red: Color::Rgb(0xbf, 0x61, 0x6a),
            event_green: Color::Rgb(0xa3, 0xbe, 0x8c),
            status_bar: Color::Rgb(0xa3, 0xbe, 0x8c),
            border_type: BorderType::Plain,
        }
    }

    /// Gruvbox theme
    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            background: Color::Rgb(0x28, 0x28, 0x28),
            foreground: Color::Rgb(0xeb, 0xdb, 0xb2),
            border: Color::Rgb(0x92, 0x83, 0x74),
            highlight: Color::Rgb(0xfa, 0xbd, 0x2f),
            title: Color::Rgb(0x83, 0xa5, 0x98),
            weekday_header: Color::Rgb(0xd3, 0x86, 0x9b),
            today: Color::Rgb(0xfa, 0xbd, 0x2f),
            non_month_day: Color::Rgb(0x3c, 0x38, 0x36),
            past_day: Color::Rgb(0x92, 0x83, 0x74),
            overflow_summary: Color::Rgb(0xfe, 0x80, 0x19),
            event_blue: Color::Rgb(0x45, 0x85, 0x88),
            event_red: Color::Rgb(0xcc, 0x24, 0x1d),
            event_green: Color::Rgb(0x98, 0x97, 0x1a),
            status_bar: Color::Rgb(0x98, 0x97, 0x1a),
            border_type: BorderType::Plain,
        }
    }
}
