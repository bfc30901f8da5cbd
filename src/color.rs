//! Terminal color model with capability-driven downgrading.
//!
//! [`Color`] is a small immutable value covering the four things a terminal
//! can be asked to display: its default color, one of the 16 standard ANSI
//! colors, an 8-bit palette entry, or a 24-bit true color. Downgrade
//! conversions move a color toward less capable systems without the caller
//! having to know which one the terminal supports.
//!
//! # Examples
//!
//! ```
//! use tapestry::color::{Color, ColorSystem};
//!
//! let orange = Color::parse("#ff8700").unwrap();
//! let on_256 = orange.downgrade(ColorSystem::EightBit);
//! assert_eq!(on_256, Color::EightBit(208));
//! ```

use crate::error::{Error, Result};

/// Color capability of an output target, from least to most capable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum ColorSystem {
    /// No color output at all.
    NoColors,
    /// 16 colors (basic ANSI).
    Standard,
    /// 256-color palette.
    EightBit,
    /// True color (24-bit RGB).
    #[default]
    TrueColor,
}

/// A terminal color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    /// The terminal's configured default color.
    #[default]
    Default,
    /// One of the 16 standard ANSI colors (0-7 normal, 8-15 bright).
    Standard(u8),
    /// An entry in the 256-color palette.
    EightBit(u8),
    /// 24-bit RGB color.
    TrueColor(u8, u8, u8),
}

/// The 16 standard ANSI color names, indexed by palette position.
const NAMES: [&str; 16] = [
    "black",
    "red",
    "green",
    "yellow",
    "blue",
    "magenta",
    "cyan",
    "white",
    "bright_black",
    "bright_red",
    "bright_green",
    "bright_yellow",
    "bright_blue",
    "bright_magenta",
    "bright_cyan",
    "bright_white",
];

/// Approximate RGB values for the standard palette, used when downgrading
/// a true color to the nearest of the 16.
#[rustfmt::skip]
const STANDARD_RGB: [(i32, i32, i32); 16] = [
    (0, 0, 0),       // 0 black
    (128, 0, 0),     // 1 red
    (0, 128, 0),     // 2 green
    (128, 128, 0),   // 3 yellow
    (0, 0, 128),     // 4 blue
    (128, 0, 128),   // 5 magenta
    (0, 128, 128),   // 6 cyan
    (192, 192, 192), // 7 white
    (128, 128, 128), // 8 bright black
    (255, 0, 0),     // 9 bright red
    (0, 255, 0),     // 10 bright green
    (255, 255, 0),   // 11 bright yellow
    (0, 0, 255),     // 12 bright blue
    (255, 0, 255),   // 13 bright magenta
    (0, 255, 255),   // 14 bright cyan
    (255, 255, 255), // 15 bright white
];

impl Color {
    /// Parse a color from a name, `#rrggbb`/`#rgb` hex, or `rgb(r,g,b)` form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for unknown names or malformed values.
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(Error::InvalidColor(spec.to_string()));
        }
        if spec.eq_ignore_ascii_case("default") {
            return Ok(Self::Default);
        }
        if let Some(hex) = spec.strip_prefix('#') {
            return Self::from_hex(hex).ok_or_else(|| Error::InvalidColor(spec.to_string()));
        }
        if let Some(body) = spec
            .strip_prefix("rgb(")
            .and_then(|s| s.strip_suffix(')'))
        {
            let mut parts = body.split(',').map(str::trim);
            let (r, g, b) = (parts.next(), parts.next(), parts.next());
            if let (Some(r), Some(g), Some(b), None) = (r, g, b, parts.next()) {
                if let (Ok(r), Ok(g), Ok(b)) = (r.parse(), g.parse(), b.parse()) {
                    return Ok(Self::TrueColor(r, g, b));
                }
            }
            return Err(Error::InvalidColor(spec.to_string()));
        }
        let lower = spec.to_ascii_lowercase();
        // Common aliases from terminal palettes.
        let lower = match lower.as_str() {
            "grey" | "gray" => "bright_black".to_string(),
            "purple" => "magenta".to_string(),
            other => other.to_string(),
        };
        NAMES
            .iter()
            .position(|&n| n == lower)
            .map(|idx| Self::Standard(idx as u8))
            .ok_or_else(|| Error::InvalidColor(spec.to_string()))
    }

    /// Parse `rrggbb` or `rgb` hex digits (no leading `#`).
    fn from_hex(hex: &str) -> Option<Self> {
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::TrueColor(r, g, b))
            }
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Self::TrueColor(r * 17, g * 17, b * 17))
            }
            _ => None,
        }
    }

    /// Downgrade this color to fit the given color system.
    ///
    /// Colors already within the system's capability pass through unchanged.
    /// `NoColors` maps everything to [`Color::Default`].
    #[must_use]
    pub fn downgrade(self, system: ColorSystem) -> Self {
        match (self, system) {
            (_, ColorSystem::NoColors) => Self::Default,
            (Self::TrueColor(r, g, b), ColorSystem::EightBit) => {
                Self::EightBit(rgb_to_256(r, g, b))
            }
            (Self::TrueColor(r, g, b), ColorSystem::Standard) => {
                Self::Standard(rgb_to_16(r, g, b))
            }
            (Self::EightBit(n), ColorSystem::Standard) => {
                if n < 16 {
                    Self::Standard(n)
                } else {
                    let (r, g, b) = eight_bit_to_rgb(n);
                    Self::Standard(rgb_to_16(r, g, b))
                }
            }
            (color, _) => color,
        }
    }
}

/// Map RGB to the nearest 256-color palette index.
///
/// Near-grayscale values use the grayscale ramp (232-255); everything else
/// maps into the 6x6x6 color cube (16-231).
#[must_use]
pub fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    let gray = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;
    let is_grayscale = (i16::from(r) - i16::from(gray)).abs() < 10
        && (i16::from(g) - i16::from(gray)).abs() < 10
        && (i16::from(b) - i16::from(gray)).abs() < 10;

    if is_grayscale {
        // Grayscale ramp: 24 levels, 10 apart, starting at 8.
        let gray_idx = (u16::from(gray) * 24 / 256) as u8;
        return 232 + gray_idx.min(23);
    }

    let ri = nearest_cube_index(r);
    let gi = nearest_cube_index(g);
    let bi = nearest_cube_index(b);
    16 + 36 * ri + 6 * gi + bi
}

/// Find the nearest index in the 6x6x6 cube for a component value.
///
/// Cube values are [0, 95, 135, 175, 215, 255] with boundaries at midpoints.
#[inline]
fn nearest_cube_index(val: u8) -> u8 {
    if val < 48 {
        0
    } else if val < 115 {
        1
    } else if val < 155 {
        2
    } else if val < 195 {
        3
    } else if val < 235 {
        4
    } else {
        5
    }
}

/// Map RGB to the nearest of the 16 standard ANSI colors.
#[must_use]
pub fn rgb_to_16(r: u8, g: u8, b: u8) -> u8 {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    let mut best = 0;
    let mut best_dist = i32::MAX;
    for (idx, &(pr, pg, pb)) in STANDARD_RGB.iter().enumerate() {
        let dist = (r - pr).pow(2) + (g - pg).pow(2) + (b - pb).pow(2);
        if dist < best_dist {
            best_dist = dist;
            best = idx;
        }
    }
    best as u8
}

/// Expand a 256-color palette index back to approximate RGB.
#[must_use]
pub fn eight_bit_to_rgb(n: u8) -> (u8, u8, u8) {
    if n < 16 {
        let (r, g, b) = STANDARD_RGB[n as usize];
        (r as u8, g as u8, b as u8)
    } else if n < 232 {
        const STEPS: [u8; 6] = [0, 95, 135, 175, 215, 255];
        let idx = n - 16;
        (
            STEPS[(idx / 36) as usize],
            STEPS[((idx / 6) % 6) as usize],
            STEPS[(idx % 6) as usize],
        )
    } else {
        let gray = 8 + (n - 232) * 10;
        (gray, gray, gray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named() {
        assert_eq!(Color::parse("red").unwrap(), Color::Standard(1));
        assert_eq!(Color::parse("BRIGHT_CYAN").unwrap(), Color::Standard(14));
        assert_eq!(Color::parse("grey").unwrap(), Color::Standard(8));
        assert_eq!(Color::parse("default").unwrap(), Color::Default);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(
            Color::parse("#ff8700").unwrap(),
            Color::TrueColor(255, 135, 0)
        );
        assert_eq!(Color::parse("#f00").unwrap(), Color::TrueColor(255, 0, 0));
    }

    #[test]
    fn test_parse_rgb_form() {
        assert_eq!(
            Color::parse("rgb(12, 34, 56)").unwrap(),
            Color::TrueColor(12, 34, 56)
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Color::parse("not-a-color").is_err());
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("rgb(1,2)").is_err());
        assert!(Color::parse("").is_err());
    }

    #[test]
    fn test_downgrade_truecolor_to_256() {
        // Pure red sits on a cube corner.
        assert_eq!(
            Color::TrueColor(255, 0, 0).downgrade(ColorSystem::EightBit),
            Color::EightBit(196)
        );
        // Near-gray uses the grayscale ramp.
        assert_eq!(
            Color::TrueColor(128, 128, 128).downgrade(ColorSystem::EightBit),
            Color::EightBit(244)
        );
    }

    #[test]
    fn test_downgrade_to_standard() {
        assert_eq!(
            Color::TrueColor(255, 0, 0).downgrade(ColorSystem::Standard),
            Color::Standard(9)
        );
        assert_eq!(
            Color::EightBit(3).downgrade(ColorSystem::Standard),
            Color::Standard(3)
        );
    }

    #[test]
    fn test_downgrade_no_colors() {
        assert_eq!(
            Color::TrueColor(1, 2, 3).downgrade(ColorSystem::NoColors),
            Color::Default
        );
    }

    #[test]
    fn test_downgrade_within_capability_is_identity() {
        let c = Color::EightBit(208);
        assert_eq!(c.downgrade(ColorSystem::TrueColor), c);
        assert_eq!(c.downgrade(ColorSystem::EightBit), c);
    }

    #[test]
    fn test_eight_bit_to_rgb_cube_roundtrip() {
        for n in [21u8, 46, 196, 208] {
            let (r, g, b) = eight_bit_to_rgb(n);
            assert_eq!(rgb_to_256(r, g, b), n);
        }
    }
}
