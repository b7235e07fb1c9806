//! Color palette.
//!
//! A [`Theme`] is a fixed set of named colors. The defaults can be partially
//! overridden from a JSON file with camelCase keys holding `#RRGGBB` strings.

use patrolchat_app::{RosterStatus, incident::Priority};
use ratatui::style::Color;
use serde::Deserialize;

use crate::TuiError;

/// Resolved palette used by the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Header and accent color.
    pub primary: Color,
    /// Screen background.
    pub background: Color,
    /// Panel background.
    pub surface: Color,
    /// Body text.
    pub text: Color,
    /// Secondary text.
    pub text_secondary: Color,
    /// Hints and empty states.
    pub text_muted: Color,
    /// Panel borders.
    pub border: Color,
    /// Positive accents.
    pub success: Color,
    /// Warnings and medium priority.
    pub warning: Color,
    /// Errors and high priority.
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(0x1E, 0x3A, 0x8A),
            background: Color::Rgb(0xF3, 0xF4, 0xF6),
            surface: Color::Rgb(0xFF, 0xFF, 0xFF),
            text: Color::Rgb(0x11, 0x18, 0x27),
            text_secondary: Color::Rgb(0x37, 0x41, 0x51),
            text_muted: Color::Rgb(0x6B, 0x72, 0x80),
            border: Color::Rgb(0xE5, 0xE7, 0xEB),
            success: Color::Rgb(0x10, 0xB9, 0x81),
            warning: Color::Rgb(0xFF, 0xC1, 0x07),
            error: Color::Rgb(0xDC, 0x35, 0x45),
        }
    }
}

/// Palette overrides as stored on disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeFile {
    primary: Option<String>,
    background: Option<String>,
    surface: Option<String>,
    text: Option<String>,
    text_secondary: Option<String>,
    text_muted: Option<String>,
    border: Option<String>,
    success: Option<String>,
    warning: Option<String>,
    error: Option<String>,
}

impl Theme {
    /// Apply the overrides in `file` on top of the defaults.
    pub fn from_file(file: &ThemeFile) -> Result<Self, TuiError> {
        let mut theme = Self::default();
        let slots: [(&'static str, &Option<String>, &mut Color); 10] = [
            ("primary", &file.primary, &mut theme.primary),
            ("background", &file.background, &mut theme.background),
            ("surface", &file.surface, &mut theme.surface),
            ("text", &file.text, &mut theme.text),
            ("textSecondary", &file.text_secondary, &mut theme.text_secondary),
            ("textMuted", &file.text_muted, &mut theme.text_muted),
            ("border", &file.border, &mut theme.border),
            ("success", &file.success, &mut theme.success),
            ("warning", &file.warning, &mut theme.warning),
            ("error", &file.error, &mut theme.error),
        ];
        for (key, value, slot) in slots {
            if let Some(value) = value {
                *slot = parse_hex(value)
                    .ok_or_else(|| TuiError::InvalidColor { key, value: value.clone() })?;
            }
        }
        Ok(theme)
    }

    /// Presence dot color.
    pub fn status_color(&self, status: RosterStatus) -> Color {
        match status {
            RosterStatus::Online => Color::Rgb(0x23, 0xA5, 0x5A),
            RosterStatus::Away => Color::Rgb(0xF0, 0xB2, 0x32),
            RosterStatus::Busy => Color::Rgb(0xF2, 0x3F, 0x43),
            RosterStatus::Offline => Color::Rgb(0x80, 0x84, 0x8E),
        }
    }

    /// Marker color for an incident priority.
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.error,
            Priority::Medium => self.warning,
            Priority::Low => self.success,
            Priority::Normal => self.primary,
        }
    }
}

/// Parse `#RRGGBB` into an RGB color.
pub fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
