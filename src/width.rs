//! Cell-width accounting for terminal rendering.
//!
//! [`cell_len`] is the single source of truth for how many terminal columns
//! a string occupies. Every other component (wrapping, measurement, live
//! shape tracking) goes through it, so it stays pure and allocation-free.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Number of terminal columns `text` occupies.
///
/// Grapheme-wise: wide (east-asian/emoji) clusters count as 2, combining
/// marks as 0, everything else as 1. When `unicode` is false the text is
/// counted one column per char, forcing ASCII-style accounting for legacy
/// terminals.
#[must_use]
pub fn cell_len(text: &str, unicode: bool) -> usize {
    if !unicode {
        return text.chars().count();
    }
    // Fast path: pure ASCII is one column per byte.
    if text.is_ascii() {
        return text.len();
    }
    text.graphemes(true).map(grapheme_width).sum()
}

/// Number of terminal columns a single grapheme cluster occupies.
///
/// A cluster never occupies more than 2 columns; ZWJ sequences whose scalar
/// widths would sum higher render as a single glyph on real terminals.
#[must_use]
pub fn grapheme_width(grapheme: &str) -> usize {
    UnicodeWidthStr::width(grapheme).min(2)
}
