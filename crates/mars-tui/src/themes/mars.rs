//! Mars palette: blue header bar over a light page

use ratatui::style::Color;
use crate::theme::Theme;

/// Light variant (default)
pub fn light() -> Theme {
    Theme {
        background: Color::Rgb(0xf4, 0xfa, 0xfd), // page tint
        text: Color::Rgb(0x23, 0x26, 0x2f),
        muted: Color::Rgb(0x6a, 0x6f, 0x7c),
        header_bg: Color::Rgb(0x1f, 0x38, 0xc5), // mars blue
        header_fg: Color::Rgb(0xff, 0xff, 0xff),
        header_active: Color::Rgb(0xff, 0xd5, 0x4f),
        accent: Color::Rgb(0x1f, 0x38, 0xc5),
        selection: Color::Rgb(0xd6, 0xec, 0xf8),
        error: Color::Rgb(0xc6, 0x28, 0x28),
        status_bg: Color::Rgb(0x42, 0xae, 0xe4),
        status_fg: Color::Rgb(0x0b, 0x1a, 0x33),
    }
}

/// Dark variant
pub fn dark() -> Theme {
    Theme {
        background: Color::Rgb(0x12, 0x16, 0x24),
        text: Color::Rgb(0xdf, 0xe4, 0xf0),
        muted: Color::Rgb(0x8a, 0x92, 0xa8),
        header_bg: Color::Rgb(0x1f, 0x38, 0xc5),
        header_fg: Color::Rgb(0xff, 0xff, 0xff),
        header_active: Color::Rgb(0xff, 0xd5, 0x4f),
        accent: Color::Rgb(0x42, 0xae, 0xe4),
        selection: Color::Rgb(0x24, 0x2c, 0x48),
        error: Color::Rgb(0xef, 0x53, 0x50),
        status_bg: Color::Rgb(0x24, 0x2c, 0x48),
        status_fg: Color::Rgb(0xdf, 0xe4, 0xf0),
    }
}
