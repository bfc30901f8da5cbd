//! ANSI escape sequence generation and buffered output.

pub mod sequences;
pub mod writer;

pub use writer::AnsiWriter;
