//! Styled, wrappable text — the workhorse renderable.
//!
//! [`Text`] holds pre-split styled lines (usually produced by the markup
//! parser) and implements the measure/render protocol: minimum width is
//! the widest unbreakable token, maximum is the widest line, and rendering
//! wraps and justifies to the negotiated width.

use crate::markup;
use crate::renderable::{
    Justify, Measurement, RenderContext, Renderable, join_lines, shape_to_height,
};
use crate::segment::{Segment, SegmentLine, split_lines};
use crate::style::Style;
use crate::wrap::{justify_line, max_word_width, wrap_lines};

/// Wrappable styled text.
#[derive(Clone, Debug, Default)]
pub struct Text {
    lines: Vec<SegmentLine>,
    justify: Option<Justify>,
}

impl Text {
    /// Build from markup.
    ///
    /// # Errors
    ///
    /// Propagates markup parse errors; no partial text is constructed.
    pub fn from_markup(source: &str) -> crate::error::Result<Self> {
        Ok(Self {
            lines: split_lines(markup::parse(source)?),
            justify: None,
        })
    }

    /// Build from plain text in one style.
    #[must_use]
    pub fn styled(text: &str, style: &Style) -> Self {
        Self {
            lines: split_lines(Segment::text_lines(text, style)),
            justify: None,
        }
    }

    /// Build from plain unstyled text.
    #[must_use]
    pub fn plain(text: &str) -> Self {
        Self::styled(text, &Style::plain())
    }

    /// Set the justification.
    #[must_use]
    pub const fn with_justify(mut self, justify: Justify) -> Self {
        self.justify = Some(justify);
        self
    }

    /// The source lines before wrapping.
    #[must_use]
    pub fn lines(&self) -> &[SegmentLine] {
        &self.lines
    }
}

impl Renderable for Text {
    fn measure(&self, ctx: &RenderContext, max_width: usize) -> Measurement {
        let min = max_word_width(&self.lines, ctx.unicode);
        let max = self
            .lines
            .iter()
            .map(|l| l.cell_width(ctx.unicode))
            .max()
            .unwrap_or(0);
        Measurement::new(min, max).clamp(max_width)
    }

    fn render(&self, ctx: &RenderContext, max_width: usize) -> Vec<Segment> {
        if max_width == 0 {
            return Vec::new();
        }
        let justify = self.justify.or(ctx.justify).unwrap_or_default();
        let mut lines: Vec<SegmentLine> = wrap_lines(&self.lines, max_width, ctx.unicode)
            .into_iter()
            .map(|line| justify_line(line, max_width, justify, ctx.unicode))
            .collect();
        if let Some(height) = ctx.height {
            lines = shape_to_height(lines, height);
        }
        join_lines(lines)
    }
}

/// Pre-split segment lines rendered verbatim, without wrapping.
///
/// For content that is already shaped to width (frames from another
/// renderable, captured output). Lines wider than the render width are
/// emitted as-is.
#[derive(Clone, Debug, Default)]
pub struct Lines {
    lines: Vec<SegmentLine>,
}

impl Lines {
    /// Build from pre-split lines.
    #[must_use]
    pub fn new(lines: Vec<SegmentLine>) -> Self {
        Self { lines }
    }

    /// Build by splitting a flat segment stream at its line breaks.
    #[must_use]
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self {
            lines: split_lines(segments),
        }
    }
}

impl Renderable for Lines {
    fn measure(&self, ctx: &RenderContext, max_width: usize) -> Measurement {
        let widest = self
            .lines
            .iter()
            .map(|l| l.cell_width(ctx.unicode))
            .max()
            .unwrap_or(0);
        Measurement::fixed(widest).clamp(max_width)
    }

    fn render(&self, ctx: &RenderContext, max_width: usize) -> Vec<Segment> {
        if max_width == 0 {
            return Vec::new();
        }
        let lines = match ctx.height {
            Some(height) => shape_to_height(self.lines.clone(), height),
            None => self.lines.clone(),
        };
        join_lines(lines)
    }
}
