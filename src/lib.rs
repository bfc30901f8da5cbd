//! `Tapestry` - Styled terminal output
//!
//! Rich-style terminal rendering: a markup language for styled text, a
//! measure/render protocol for composable visual elements, capability-aware
//! ANSI generation with color downgrading, and live regions with
//! flicker-free in-place redraw.

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for ioctl FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional size casts
#![allow(clippy::cast_sign_loss)] // Intentional size conversions
#![allow(clippy::cast_precision_loss)] // Intentional for color math
#![allow(clippy::module_name_repetitions)] // Allow markup::MarkupError etc
#![allow(clippy::missing_errors_doc)] // Error sections on the public seams only
#![allow(clippy::missing_panics_doc)] // Non-test code does not panic
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod ansi;
pub mod color;
pub mod columns;
pub mod console;
pub mod error;
pub mod event;
pub mod live;
pub mod markup;
pub mod pipeline;
pub mod profile;
pub mod ratio;
pub mod renderable;
pub mod segment;
pub mod style;
pub mod terminal;
pub mod text;
pub mod width;
pub mod wrap;

// Re-export core types at crate root
pub use color::{Color, ColorSystem};
pub use error::{Error, Result};
pub use event::{LogLevel, emit_log, set_log_callback};
pub use segment::{Segment, SegmentLine, split_lines};
pub use style::{Decoration, Style};

// Re-export the rendering protocol
pub use pipeline::{HookChain, RenderHook};
pub use renderable::{Justify, Measurement, RenderContext, Renderable};

// Re-export renderables and the console surface
pub use ansi::AnsiWriter;
pub use columns::Columns;
pub use console::Console;
pub use live::{Cropping, Live, Overflow, Shape};
pub use profile::Profile;
pub use text::{Lines, Text};

// Re-export layout helpers
pub use ratio::ratio_distribute;
pub use terminal::{is_tty, stdout_profile, terminal_size};
pub use width::cell_len;
pub use wrap::wrap_lines;
