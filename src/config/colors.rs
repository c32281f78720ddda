//! Color configuration for the TUI.

use std::str::FromStr;

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

/// Configuration for all TUI colors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub active_border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub inactive_border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    /// Videos the viewer has no access to.
    #[serde(deserialize_with = "deserialize_color")]
    pub locked_item: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub metadata_channel: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub metadata_date: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub metadata_link: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub error_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub error_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            active_border: Color::Cyan,
            inactive_border: Color::DarkGray,
            selection_bg: Color::Cyan,
            selection_fg: Color::Black,
            locked_item: Color::DarkGray,
            metadata_channel: Color::Yellow,
            metadata_date: Color::Yellow,
            metadata_link: Color::Blue,
            error_fg: Color::White,
            error_bg: Color::Red,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map_err(de::Error::custom)
}

/// Parse a named color (`"DarkGray"`, `"light blue"`) or a `#RRGGBB` /
/// `#RGB` hex code.
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    let expanded;
    let candidate = match s.strip_prefix('#') {
        Some(hex) if hex.len() == 3 => {
            expanded = hex.chars().fold(String::from("#"), |mut acc, c| {
                acc.push(c);
                acc.push(c);
                acc
            });
            expanded.as_str()
        }
        Some(hex) if hex.len() != 6 => return Err(format!("Invalid hex color format: {}", s)),
        _ => s,
    };

    Color::from_str(candidate).map_err(|_| format!("Unknown color: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color_string("Cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color_string("CYAN").unwrap(), Color::Cyan);
        assert_eq!(parse_color_string("DarkGray").unwrap(), Color::DarkGray);
        assert_eq!(parse_color_string("Red").unwrap(), Color::Red);
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(parse_color_string("#FF0000").unwrap(), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color_string("#00ff00").unwrap(), Color::Rgb(0, 255, 0));
    }

    #[test]
    fn test_parse_short_hex_colors() {
        assert_eq!(parse_color_string("#F00").unwrap(), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color_string("#fff").unwrap(), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_parse_invalid_colors() {
        assert!(parse_color_string("invalid").is_err());
        assert!(parse_color_string("#GGGGGG").is_err());
        assert!(parse_color_string("#12345").is_err());
    }
}
