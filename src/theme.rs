//! Light/dark theme flag and the palettes it selects.

use crate::state::{state_cell, StateReader, StateWriter};
use ratatui::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Two-state colour scheme.
pub enum Theme {
    /// Dark text on a light background.
    Light,
    /// Light text on a dark background.
    Dark,
}

impl Theme {
    #[must_use]
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    /// Parses `light` or `dark`, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    /// Reads the `COLORFGBG` convention (`fg;bg`): background 7 or 15 means a light terminal.
    pub fn from_colorfgbg(value: &str) -> Option<Self> {
        let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        Some(if background == 7 || background == 15 {
            Self::Light
        } else {
            Self::Dark
        })
    }

    #[must_use]
    /// Ambient preference of the terminal, dark when it cannot be determined.
    pub fn detect() -> Self {
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|v| Self::from_colorfgbg(&v))
            .unwrap_or(Self::Dark)
    }

    #[must_use]
    /// Colours used to render this theme.
    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                background: Color::Rgb(249, 250, 251),
                foreground: Color::Rgb(17, 24, 39),
                muted: Color::Rgb(75, 85, 99),
                accent: Color::Rgb(219, 39, 119),
                accent_alt: Color::Rgb(147, 51, 234),
                success: Color::Rgb(22, 163, 74),
                error: Color::Rgb(220, 38, 38),
            },
            Self::Dark => Palette {
                background: Color::Rgb(17, 24, 39),
                foreground: Color::Rgb(249, 250, 251),
                muted: Color::Rgb(156, 163, 175),
                accent: Color::Rgb(244, 114, 182),
                accent_alt: Color::Rgb(192, 132, 252),
                success: Color::Rgb(74, 222, 128),
                error: Color::Rgb(248, 113, 113),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Resolved colours for one theme.
pub struct Palette {
    /// Page background.
    pub background: Color,
    /// Body text.
    pub foreground: Color,
    /// Secondary text and borders.
    pub muted: Color,
    /// Headings and the active menu entry.
    pub accent: Color,
    /// Progress bars and secondary highlights.
    pub accent_alt: Color,
    /// Success status messages.
    pub success: Color,
    /// Error status messages.
    pub error: Color,
}

/// Owner of the theme cell; only explicit user toggles change it after mount.
pub struct ThemeToggle {
    theme: StateWriter<Theme>,
}

impl ThemeToggle {
    #[must_use]
    /// Creates the toggle with its initial theme and a reader for the UI.
    pub fn new(initial: Theme) -> (Self, StateReader<Theme>) {
        let (theme, reader) = state_cell(initial);
        (Self { theme }, reader)
    }

    /// Flips the theme and returns the new value.
    pub fn toggle(&mut self) -> Theme {
        let mut next = Theme::Dark;
        self.theme.update(|t| {
            *t = t.toggled();
            next = *t;
        });
        tracing::debug!(theme = ?next, "theme toggled");
        next
    }
}

#[cfg(test)]
#[path = "tests/theme.rs"]
mod tests;
