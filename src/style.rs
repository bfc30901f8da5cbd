//! Text styling with decorations, colors, and hyperlinks.
//!
//! This module provides:
//!
//! - [`Decoration`]: Bitflags for bold, italic, underline, etc.
//! - [`Style`]: Complete styling including colors, decorations, and a link
//! - [`Style::parse`]: The style word grammar shared with markup tag bodies
//!
//! # Examples
//!
//! ```
//! use tapestry::style::Style;
//!
//! let heading = Style::parse("bold bright_white on blue").unwrap();
//!
//! // Combine styles (right side takes precedence)
//! let emphasized = Style::combine(&heading, &Style::parse("italic").unwrap());
//! assert!(emphasized.decoration.contains(tapestry::style::Decoration::BOLD));
//! ```

use crate::color::Color;
use crate::error::{Error, Result};
use bitflags::bitflags;

bitflags! {
    /// Text decoration attributes (bold, italic, underline, etc.).
    ///
    /// Decorations combine with bitwise OR. Not all terminals support all
    /// decorations; unsupported ones are silently ignored by the terminal.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Decoration: u16 {
        /// Bold/increased intensity.
        const BOLD          = 0x01;
        /// Dim/decreased intensity.
        const DIM           = 0x02;
        /// Italic (not widely supported).
        const ITALIC        = 0x04;
        /// Underlined text.
        const UNDERLINE     = 0x08;
        /// Blinking text (rarely supported).
        const BLINK         = 0x10;
        /// Swapped foreground/background.
        const REVERSE       = 0x20;
        /// Hidden/invisible text.
        const CONCEAL       = 0x40;
        /// Strikethrough text.
        const STRIKETHROUGH = 0x80;
    }
}

/// Complete text style: colors, decorations, and an optional hyperlink.
///
/// Styles are immutable values. Absent colors mean "use the terminal
/// default" so styled text respects the user's theme. The link field carries
/// a URL; numeric OSC 8 ids are allocated by the writer at output time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Style {
    /// Foreground color (None = terminal default).
    pub fg: Option<Color>,
    /// Background color (None = terminal default).
    pub bg: Option<Color>,
    /// Text decorations.
    pub decoration: Decoration,
    /// Hyperlink URL. An empty string marks a bare `link` span whose text
    /// doubles as the URL (resolved by the markup parser).
    pub link: Option<String>,
}

impl Style {
    /// Style with no colors, decorations, or link.
    pub const fn plain() -> Self {
        Self {
            fg: None,
            bg: None,
            decoration: Decoration::empty(),
            link: None,
        }
    }

    /// Create a style with only a foreground color.
    #[must_use]
    pub const fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            bg: None,
            decoration: Decoration::empty(),
            link: None,
        }
    }

    /// Create a style with only a background color.
    #[must_use]
    pub const fn bg(color: Color) -> Self {
        Self {
            fg: None,
            bg: Some(color),
            decoration: Decoration::empty(),
            link: None,
        }
    }

    /// Create a style with only decorations.
    #[must_use]
    pub const fn decorated(decoration: Decoration) -> Self {
        Self {
            fg: None,
            bg: None,
            decoration,
            link: None,
        }
    }

    /// Return a new style with the given foreground color.
    #[must_use]
    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Return a new style with the given background color.
    #[must_use]
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Return a new style with the given decorations added.
    #[must_use]
    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decoration |= decoration;
        self
    }

    /// Return a new style with the given hyperlink URL.
    #[must_use]
    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }

    /// Check if this style has any non-default properties.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.decoration.is_empty() && self.link.is_none()
    }

    /// Cascading merge: `b`'s set fields win, decorations OR together.
    ///
    /// Associative and total:
    /// `combine(&combine(a, b), c) == combine(a, &combine(b, c))`.
    #[must_use]
    pub fn combine(a: &Self, b: &Self) -> Self {
        Self {
            fg: b.fg.or(a.fg),
            bg: b.bg.or(a.bg),
            decoration: a.decoration | b.decoration,
            link: b.link.clone().or_else(|| a.link.clone()),
        }
    }

    /// Parse a whitespace-separated style specification.
    ///
    /// The grammar accepted here is the same one markup tag bodies use:
    /// decoration keywords (`bold`, `italic`, ...), color names or hex
    /// values, `on <color>` for the background, `link=URL`, and bare `link`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStyle`] for an unknown word and
    /// [`Error::InvalidColor`] for a bad color value.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut style = Self::plain();
        let mut words = spec.split_whitespace().peekable();
        while let Some(word) = words.next() {
            if word.eq_ignore_ascii_case("on") {
                let color_word = words
                    .next()
                    .ok_or_else(|| Error::InvalidStyle("missing color after 'on'".to_string()))?;
                style.bg = Some(Color::parse(color_word)?);
                continue;
            }
            if let Some(url) = word.strip_prefix("link=") {
                style.link = Some(url.to_string());
                continue;
            }
            if word.eq_ignore_ascii_case("link") {
                // Bare link: the span's text doubles as the URL.
                style.link = Some(String::new());
                continue;
            }
            if let Some(decoration) = parse_decoration(word) {
                style.decoration |= decoration;
                continue;
            }
            match Color::parse(word) {
                Ok(color) => style.fg = Some(color),
                Err(_) => return Err(Error::InvalidStyle(word.to_string())),
            }
        }
        Ok(style)
    }
}

/// Map a decoration keyword to its flag.
fn parse_decoration(word: &str) -> Option<Decoration> {
    let flag = match word.to_ascii_lowercase().as_str() {
        "bold" | "b" => Decoration::BOLD,
        "dim" => Decoration::DIM,
        "italic" | "i" => Decoration::ITALIC,
        "underline" | "u" => Decoration::UNDERLINE,
        "blink" => Decoration::BLINK,
        "reverse" => Decoration::REVERSE,
        "conceal" => Decoration::CONCEAL,
        "strike" | "strikethrough" | "s" => Decoration::STRIKETHROUGH,
        _ => return None,
    };
    Some(flag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_right_bias() {
        let base = Style::fg(Color::Standard(1)).with_decoration(Decoration::BOLD);
        let overlay = Style::fg(Color::Standard(4)).with_decoration(Decoration::ITALIC);

        let merged = Style::combine(&base, &overlay);
        assert_eq!(merged.fg, Some(Color::Standard(4)));
        assert!(merged.decoration.contains(Decoration::BOLD));
        assert!(merged.decoration.contains(Decoration::ITALIC));
    }

    #[test]
    fn test_combine_absent_falls_back() {
        let base = Style::fg(Color::Standard(2)).with_bg(Color::Standard(0));
        let overlay = Style::decorated(Decoration::UNDERLINE);

        let merged = Style::combine(&base, &overlay);
        assert_eq!(merged.fg, Some(Color::Standard(2)));
        assert_eq!(merged.bg, Some(Color::Standard(0)));
    }

    #[test]
    fn test_combine_associative() {
        let a = Style::fg(Color::Standard(1)).with_decoration(Decoration::BOLD);
        let b = Style::bg(Color::Standard(4)).with_link("https://example.com");
        let c = Style::fg(Color::TrueColor(1, 2, 3)).with_decoration(Decoration::DIM);

        let left = Style::combine(&Style::combine(&a, &b), &c);
        let right = Style::combine(&a, &Style::combine(&b, &c));
        assert_eq!(left, right);
    }

    #[test]
    fn test_parse_full_spec() {
        let style = Style::parse("bold italic bright_white on blue").unwrap();
        assert_eq!(style.fg, Some(Color::Standard(15)));
        assert_eq!(style.bg, Some(Color::Standard(4)));
        assert!(style.decoration.contains(Decoration::BOLD));
        assert!(style.decoration.contains(Decoration::ITALIC));
    }

    #[test]
    fn test_parse_link_forms() {
        let style = Style::parse("link=https://example.com bold").unwrap();
        assert_eq!(style.link.as_deref(), Some("https://example.com"));

        let bare = Style::parse("link").unwrap();
        assert_eq!(bare.link.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_hex_foreground() {
        let style = Style::parse("#ff0000").unwrap();
        assert_eq!(style.fg, Some(Color::TrueColor(255, 0, 0)));
    }

    #[test]
    fn test_parse_unknown_word() {
        assert!(matches!(
            Style::parse("bold wiggly"),
            Err(Error::InvalidStyle(_))
        ));
    }

    #[test]
    fn test_parse_on_without_color() {
        assert!(Style::parse("red on").is_err());
    }

    #[test]
    fn test_parse_empty_is_plain() {
        assert!(Style::parse("").unwrap().is_plain());
    }
}
