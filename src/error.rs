//! Error types for tapestry.

use std::fmt;
use std::io;

/// Result type alias for tapestry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tapestry operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from the output sink.
    Io(io::Error),
    /// Invalid color specification (unknown name, malformed hex, etc.).
    InvalidColor(String),
    /// Invalid style word in a style specification.
    InvalidStyle(String),
    /// Markup syntax error with the 0-based character position of the fault.
    Markup { position: usize, message: String },
    /// Invalid construction argument (zero dimension, mismatched ratio lists).
    Config(String),
    /// A live-style session was started while another is active.
    LiveSessionActive,
    /// Operation requires an interactive terminal.
    NotInteractive,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidColor(s) => write!(f, "invalid color: {s}"),
            Self::InvalidStyle(s) => write!(f, "invalid style word: {s}"),
            Self::Markup { position, message } => {
                write!(f, "markup error at position {position}: {message}")
            }
            Self::Config(s) => write!(f, "invalid configuration: {s}"),
            Self::LiveSessionActive => {
                write!(f, "a live session is already active on this console")
            }
            Self::NotInteractive => {
                write!(f, "operation requires an interactive terminal")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
