//! Colour tables for the light and dark appearances.

use ratatui::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Named colours used by every view.
pub struct Theme {
    /// Body text.
    pub foreground: Color,
    /// Pane background.
    pub background: Color,
    /// Borders, titles and the article name.
    pub accent: Color,
    /// Secondary text such as snippets and help lines.
    pub muted: Color,
    /// Text of the section emphasised after navigation.
    pub highlight_fg: Color,
    /// Background of the section emphasised after navigation.
    pub highlight_bg: Color,
    /// Text of a query match.
    pub match_fg: Color,
    /// Background of a query match.
    pub match_bg: Color,
}

impl Theme {
    #[must_use]
    /// High-contrast table for dark terminals.
    pub const fn dark() -> Self {
        Self {
            foreground: Color::Rgb(229, 231, 235),
            background: Color::Rgb(17, 24, 39),
            accent: Color::Rgb(96, 165, 250),
            muted: Color::Rgb(156, 163, 175),
            highlight_fg: Color::Rgb(17, 24, 39),
            highlight_bg: Color::Rgb(251, 191, 36),
            match_fg: Color::Rgb(17, 24, 39),
            match_bg: Color::Rgb(250, 204, 21),
        }
    }

    #[must_use]
    /// Table for light terminals.
    pub const fn light() -> Self {
        Self {
            foreground: Color::Rgb(17, 24, 39),
            background: Color::Rgb(249, 250, 251),
            accent: Color::Rgb(37, 99, 235),
            muted: Color::Rgb(107, 114, 128),
            highlight_fg: Color::Rgb(17, 24, 39),
            highlight_bg: Color::Rgb(253, 230, 138),
            match_fg: Color::Rgb(17, 24, 39),
            match_bg: Color::Rgb(254, 240, 138),
        }
    }

    #[must_use]
    /// Resolves a theme by name, falling back to dark for anything unknown.
    pub fn by_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, using dark");
                Self::dark()
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
#[path = "tests/theme.rs"]
mod tests;
