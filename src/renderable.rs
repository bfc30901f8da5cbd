//! The measure/render protocol every visual element implements.
//!
//! Rendering is two-pass: the pipeline first asks a renderable how much
//! width it wants ([`Renderable::measure`]), negotiates a final width (for
//! composites, via the ratio distributor), then asks for segments at that
//! width ([`Renderable::render`]).

use crate::color::ColorSystem;
use crate::segment::{Segment, SegmentLine};

/// Width requirements of a renderable.
///
/// `min` is the narrowest width the content renders into without arbitrary
/// truncation; `max` is the width it would use unconstrained.
/// Invariant: `0 <= min <= max`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Measurement {
    /// Minimum usable width in cells.
    pub min: usize,
    /// Unconstrained width in cells.
    pub max: usize,
}

impl Measurement {
    /// Create a measurement, swapping the bounds if given out of order.
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// A fixed-width measurement (`min == max`).
    #[must_use]
    pub const fn fixed(width: usize) -> Self {
        Self {
            min: width,
            max: width,
        }
    }

    /// Clamp both bounds to at most `width`.
    #[must_use]
    pub fn clamp(self, width: usize) -> Self {
        Self {
            min: self.min.min(width),
            max: self.max.min(width),
        }
    }
}

/// Horizontal justification of wrapped lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Justify {
    /// No padding.
    #[default]
    Left,
    /// Pad split left/right, odd cell on the right.
    Center,
    /// Full pad on the left.
    Right,
}

/// Immutable per-render-call context.
///
/// Derived contexts (an overridden height, a forced justification) are
/// copies produced by the `with_*` methods, never mutations of a shared
/// instance.
#[derive(Clone, Debug)]
pub struct RenderContext {
    /// Maximum width available to the root renderable.
    pub max_width: usize,
    /// If set, output is clipped/padded to exactly this many lines.
    pub height: Option<usize>,
    /// Full console size (width, height).
    pub console_size: (u16, u16),
    /// Justification override, if any.
    pub justify: Option<Justify>,
    /// Whether Unicode cell-width accounting is in effect.
    pub unicode: bool,
    /// Color capability of the target.
    pub color_system: ColorSystem,
}

impl RenderContext {
    /// Context for a console of the given size and capabilities.
    #[must_use]
    pub fn new(console_size: (u16, u16), unicode: bool, color_system: ColorSystem) -> Self {
        Self {
            max_width: console_size.0 as usize,
            height: None,
            console_size,
            justify: None,
            unicode,
            color_system,
        }
    }

    /// Copy with a different maximum width.
    #[must_use]
    pub fn with_max_width(&self, max_width: usize) -> Self {
        Self {
            max_width,
            ..self.clone()
        }
    }

    /// Copy with an exact height constraint.
    #[must_use]
    pub fn with_height(&self, height: usize) -> Self {
        Self {
            height: Some(height),
            ..self.clone()
        }
    }

    /// Copy with no height constraint.
    #[must_use]
    pub fn without_height(&self) -> Self {
        Self {
            height: None,
            ..self.clone()
        }
    }

    /// Copy with a justification override.
    #[must_use]
    pub fn with_justify(&self, justify: Justify) -> Self {
        Self {
            justify: Some(justify),
            ..self.clone()
        }
    }
}

/// Anything that can be measured and rendered to segments.
///
/// `measure` must be idempotent and side-effect-free; callers probe it
/// speculatively before committing to a width. `render` produces segments
/// whose lines never exceed `max_width` cells; a `max_width` of 0 renders
/// empty rather than erroring.
pub trait Renderable {
    /// Report the width range this content can be rendered into.
    fn measure(&self, ctx: &RenderContext, max_width: usize) -> Measurement;

    /// Produce segments at the chosen width.
    fn render(&self, ctx: &RenderContext, max_width: usize) -> Vec<Segment>;
}

impl Renderable for Box<dyn Renderable> {
    fn measure(&self, ctx: &RenderContext, max_width: usize) -> Measurement {
        self.as_ref().measure(ctx, max_width)
    }

    fn render(&self, ctx: &RenderContext, max_width: usize) -> Vec<Segment> {
        self.as_ref().render(ctx, max_width)
    }
}

/// Clip or pad rendered lines to exactly `height` rows.
///
/// Renderables apply this when `RenderContext::height` is set: extra
/// lines are dropped from the bottom, missing lines appended empty.
#[must_use]
pub fn shape_to_height(lines: Vec<SegmentLine>, height: usize) -> Vec<SegmentLine> {
    let mut lines = lines;
    lines.truncate(height);
    while lines.len() < height {
        lines.push(SegmentLine::new());
    }
    lines
}

/// Flatten lines back into a segment stream with explicit breaks.
#[must_use]
pub fn join_lines(lines: Vec<SegmentLine>) -> Vec<Segment> {
    let mut out = Vec::new();
    for line in lines {
        out.extend(line.segments);
        out.push(Segment::LineBreak);
    }
    out
}
