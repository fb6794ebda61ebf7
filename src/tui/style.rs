//! Color scheme and style tokens.

use ratatui::style::{Color, Modifier, Style};

/// Semantic style applied to subsequently written text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StyleToken {
    /// Plain text; terminal background passes through.
    #[default]
    Reset,
    White,
    Blue,
    Yellow,
    Red,
    Black,
    Cyan,
    Green,
    Magenta,
}

/// Dashboard palette.
pub struct Theme;

impl Theme {
    pub const FG: Color = Color::White;
    pub const BORDER: Color = Color::DarkGray;
}

impl StyleToken {
    pub const ALL: [StyleToken; 9] = [
        StyleToken::Reset,
        StyleToken::White,
        StyleToken::Blue,
        StyleToken::Yellow,
        StyleToken::Red,
        StyleToken::Black,
        StyleToken::Cyan,
        StyleToken::Green,
        StyleToken::Magenta,
    ];

    /// Foreground color for the token; `None` for `Reset`.
    pub fn color(self) -> Option<Color> {
        match self {
            StyleToken::Reset => None,
            StyleToken::White => Some(Color::White),
            StyleToken::Blue => Some(Color::Blue),
            StyleToken::Yellow => Some(Color::Yellow),
            StyleToken::Red => Some(Color::Red),
            StyleToken::Black => Some(Color::Black),
            StyleToken::Cyan => Some(Color::Cyan),
            StyleToken::Green => Some(Color::Green),
            StyleToken::Magenta => Some(Color::Magenta),
        }
    }

    /// Terminal style for the token.
    ///
    /// Styles are complete: applying one replaces every attribute of the
    /// cell. Colored tokens are bold; `Reset` is plain text on the default
    /// background.
    pub fn style(self) -> Style {
        match self.color() {
            Some(color) => Style::reset().fg(color).add_modifier(Modifier::BOLD),
            None => Styles::default(),
        }
    }
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::reset().fg(Theme::FG)
    }

    /// Frame border style.
    pub fn border() -> Style {
        Style::reset().fg(Theme::BORDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_is_plain() {
        let style = StyleToken::Reset.style();
        assert_eq!(style.fg, Some(Color::White));
        assert_eq!(style.bg, Some(Color::Reset));
        assert!(!style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_colored_tokens_are_bold() {
        for token in StyleToken::ALL.into_iter().skip(1) {
            let style = token.style();
            assert_eq!(style.fg, token.color());
            assert!(style.add_modifier.contains(Modifier::BOLD), "{:?}", token);
        }
    }

    #[test]
    fn test_tokens_are_distinct() {
        let mut colors: Vec<_> = StyleToken::ALL.iter().map(|t| t.color()).collect();
        colors.dedup();
        assert_eq!(colors.len(), StyleToken::ALL.len());
    }
}
