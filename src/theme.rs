//! Terminal palette for the calculator and carousel.
//! Brand colours by default, with optional hex overrides from the config file.

use ratatui::style::Color;

use crate::config::ThemeConfig;

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Color,           // Active borders, focused controls (brand purple)
    pub accent_bright: Color,    // Secondary highlight (brand blue)
    pub money: Color,            // Yearly savings figure
    pub food: Color,             // Cat food months figure
    pub trees: Color,            // Trees saved figure and icons
    pub warning: Color,          // Status messages
    pub text: Color,             // Primary text
    pub text_dim: Color,         // Labels, hints
    pub bg_selected: Color,      // Focused control background
    pub inactive: Color,         // Inactive borders
    pub header: Color,           // Section headings
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(147, 51, 234),       // #9333ea
            accent_bright: Color::Rgb(59, 130, 246), // #3b82f6
            money: Color::Rgb(34, 197, 94),          // #22c55e
            food: Color::Rgb(245, 158, 11),          // #f59e0b
            trees: Color::Rgb(20, 184, 166),         // #14b8a6
            warning: Color::Rgb(250, 179, 135),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(192, 132, 252),       // #c084fc
        }
    }
}

impl Theme {
    /// Default palette with any valid overrides applied
    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut theme = Self::default();

        let overrides = [
            (&config.accent, &mut theme.accent),
            (&config.money, &mut theme.money),
            (&config.trees, &mut theme.trees),
        ];
        for (value, slot) in overrides {
            if let Some(hex) = value {
                match Self::parse_hex_color(hex) {
                    Some(color) => *slot = color,
                    None => tracing::warn!("Ignoring invalid theme color: {}", hex),
                }
            }
        }

        theme
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');

        if s.len() == 6 {
            let r = u8::from_str_radix(s.get(0..2)?, 16).ok()?;
            let g = u8::from_str_radix(s.get(2..4)?, 16).ok()?;
            let b = u8::from_str_radix(s.get(4..6)?, 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(s.get(0..1)?, 16).ok()? * 17;
            let g = u8::from_str_radix(s.get(1..2)?, 16).ok()? * 17;
            let b = u8::from_str_radix(s.get(2..3)?, 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}
