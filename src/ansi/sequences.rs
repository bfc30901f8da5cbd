//! ANSI escape sequence constants and generators.
//!
//! Numeric parameters follow standard VT100/xterm semantics so output is
//! compatible with real terminals and stable under golden-output tests.

/// Reset all attributes to default.
pub const RESET: &str = "\x1b[0m";

/// Clear entire screen (ED 2).
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Clear from cursor to end of screen (ED 0).
pub const CLEAR_BELOW: &str = "\x1b[J";

/// Clear entire line (EL 2).
pub const CLEAR_LINE: &str = "\x1b[2K";

/// Clear from cursor to end of line (EL 0).
pub const CLEAR_LINE_RIGHT: &str = "\x1b[K";

/// Hide cursor.
pub const CURSOR_HIDE: &str = "\x1b[?25l";

/// Show cursor.
pub const CURSOR_SHOW: &str = "\x1b[?25h";

/// Move cursor to home position (CUP 1;1).
pub const CURSOR_HOME: &str = "\x1b[H";

/// Carriage return (column 0, no escape needed).
pub const CARRIAGE_RETURN: &str = "\r";

/// Move cursor up `n` lines (CUU).
#[must_use]
pub fn cursor_up(n: usize) -> String {
    if n == 0 {
        String::new()
    } else {
        format!("\x1b[{n}A")
    }
}

/// Move cursor to 1-based (row, column) (CUP).
#[must_use]
pub fn cursor_position(row: usize, col: usize) -> String {
    format!("\x1b[{row};{col}H")
}

/// Open an OSC 8 hyperlink with the given id and URL.
#[must_use]
pub fn hyperlink_open(id: u32, url: &str) -> String {
    format!("\x1b]8;id={id};{url}\x1b\\")
}

/// Close the current OSC 8 hyperlink.
pub const HYPERLINK_CLOSE: &str = "\x1b]8;;\x1b\\";
