//! Theme registry and loader

pub mod mars;

use mars_core::config::{ThemeColorOverrides, ThemeConfig};
use ratatui::style::Color;
use tracing::warn;

use crate::theme::Theme;

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Load a theme by name from config
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "mars" | "mars-light" => mars::light(),
        "mars-dark" => mars::dark(),
        other => {
            warn!("Unknown theme '{}', using mars", other);
            mars::light()
        }
    };

    apply_overrides(base, &config.colors)
}

/// Apply user color overrides to a base theme
fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    let slots: [(&Option<String>, &mut Color); 8] = [
        (&overrides.background, &mut theme.background),
        (&overrides.text, &mut theme.text),
        (&overrides.muted, &mut theme.muted),
        (&overrides.header_bg, &mut theme.header_bg),
        (&overrides.header_fg, &mut theme.header_fg),
        (&overrides.accent, &mut theme.accent),
        (&overrides.selection, &mut theme.selection),
        (&overrides.error, &mut theme.error),
    ];

    for (hex, slot) in slots {
        if let Some(hex) = hex {
            match parse_hex_color(hex) {
                Some(color) => *slot = color,
                None => warn!("Ignoring invalid theme color '{}'", hex),
            }
        }
    }

    theme
}

/// Get list of available theme names
pub fn available_themes() -> Vec<&'static str> {
    vec!["mars", "mars-dark"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_6digit() {
        let color = parse_hex_color("#1f38c5").unwrap();
        assert!(matches!(color, Color::Rgb(0x1f, 0x38, 0xc5)));
    }

    #[test]
    fn test_parse_hex_color_3digit() {
        let color = parse_hex_color("#f50").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert!(parse_hex_color("invalid").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
        assert!(parse_hex_color("#éé").is_none());
    }

    #[test]
    fn test_load_theme_default() {
        let theme = load_theme(&ThemeConfig::default());
        assert!(matches!(theme.header_bg, Color::Rgb(0x1f, 0x38, 0xc5)));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = ThemeConfig {
            name: "solarized".to_string(),
            ..Default::default()
        };
        let theme = load_theme(&config);
        assert!(matches!(theme.background, Color::Rgb(0xf4, 0xfa, 0xfd)));
    }

    #[test]
    fn test_load_theme_with_override() {
        let config = ThemeConfig {
            name: "mars-dark".to_string(),
            colors: ThemeColorOverrides {
                accent: Some("#ff0000".to_string()),
                text: Some("nope".to_string()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert!(matches!(theme.accent, Color::Rgb(255, 0, 0)));
        assert!(matches!(theme.text, Color::Rgb(0xdf, 0xe4, 0xf0)));
    }
}
