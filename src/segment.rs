//! Atomic styled output units.
//!
//! A [`Segment`] is the atom everything renders down to: styled text (never
//! containing a newline), a raw control-code run with zero cell width, or a
//! line break. [`SegmentLine`] is one terminal row's worth of segments.

use crate::style::Style;
use crate::width::cell_len;

/// Atomic unit of terminal output.
///
/// Exactly one of the three forms by construction. Text segments never
/// contain `\n`; use [`Segment::text_lines`] to build segments from text
/// that may span lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Styled text without line breaks.
    Text {
        /// The text content. Never contains `\n`.
        text: String,
        /// Style applied to the whole run.
        style: Style,
    },
    /// Raw escape bytes; contributes zero cell width.
    Control(String),
    /// An explicit line break.
    LineBreak,
}

impl Segment {
    /// Create a styled text segment.
    ///
    /// The text must not contain `\n`; callers with multi-line text use
    /// [`Segment::text_lines`].
    #[must_use]
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        let text = text.into();
        debug_assert!(!text.contains('\n'), "text segments never contain newlines");
        Self::Text { text, style }
    }

    /// Create a plain (unstyled) text segment.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Style::plain())
    }

    /// Create a control-code segment carrying raw escape bytes.
    #[must_use]
    pub fn control(bytes: impl Into<String>) -> Self {
        Self::Control(bytes.into())
    }

    /// Build segments from text that may contain `\n`, inserting
    /// [`Segment::LineBreak`] at each newline.
    #[must_use]
    pub fn text_lines(text: &str, style: &Style) -> Vec<Self> {
        let mut out = Vec::new();
        let mut first = true;
        for line in text.split('\n') {
            if !first {
                out.push(Self::LineBreak);
            }
            first = false;
            if !line.is_empty() {
                out.push(Self::styled(line, style.clone()));
            }
        }
        out
    }

    /// The text content of this segment ("" for breaks, raw bytes for
    /// control segments).
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text { text, .. } => text,
            Self::Control(bytes) => bytes,
            Self::LineBreak => "",
        }
    }

    /// Cell width this segment occupies. Control codes and breaks are 0.
    #[must_use]
    pub fn cell_width(&self, unicode: bool) -> usize {
        match self {
            Self::Text { text, .. } => cell_len(text, unicode),
            Self::Control(_) | Self::LineBreak => 0,
        }
    }

    /// Whether this is a control-code segment.
    #[must_use]
    pub const fn is_control(&self) -> bool {
        matches!(self, Self::Control(_))
    }

    /// Whether this is a line-break segment.
    #[must_use]
    pub const fn is_line_break(&self) -> bool {
        matches!(self, Self::LineBreak)
    }
}

/// An ordered sequence of segments forming one terminal row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SegmentLine {
    /// Segments in output order.
    pub segments: Vec<Segment>,
}

impl SegmentLine {
    /// Create an empty line.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Total cell width of the line.
    #[must_use]
    pub fn cell_width(&self, unicode: bool) -> usize {
        self.segments.iter().map(|s| s.cell_width(unicode)).sum()
    }

    /// Concatenated plain text of the line (control bytes excluded).
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            if let Segment::Text { text, .. } = segment {
                out.push_str(text);
            }
        }
        out
    }

    /// Append a segment.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Whether the line holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<Vec<Segment>> for SegmentLine {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

/// Split a flat segment stream into lines at [`Segment::LineBreak`]s.
///
/// The breaks themselves are consumed; control segments stay attached to
/// the line they appear on.
#[must_use]
pub fn split_lines(segments: Vec<Segment>) -> Vec<SegmentLine> {
    let mut lines = Vec::new();
    let mut current = SegmentLine::new();
    for segment in segments {
        if segment.is_line_break() {
            lines.push(std::mem::take(&mut current));
        } else {
            current.push(segment);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
