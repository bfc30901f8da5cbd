//! Side-by-side composition of renderables.
//!
//! [`Columns`] is the canonical composite: it measures its children,
//! negotiates their widths through the ratio distributor, renders each
//! child into its slice, and zips the resulting lines into rows. Parent
//! owns children exclusively; there are no back-references.

use crate::ratio::ratio_distribute;
use crate::renderable::{
    Measurement, RenderContext, Renderable, join_lines, shape_to_height,
};
use crate::segment::{Segment, SegmentLine, split_lines};

/// Weighted columns of child renderables separated by a gutter.
pub struct Columns {
    children: Vec<Box<dyn Renderable>>,
    weights: Vec<u32>,
    gutter: usize,
}

impl Columns {
    /// Create equal-weight columns with a one-cell gutter.
    #[must_use]
    pub fn new(children: Vec<Box<dyn Renderable>>) -> Self {
        let weights = vec![1; children.len()];
        Self {
            children,
            weights,
            gutter: 1,
        }
    }

    /// Set per-column weights.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Config`] if the weight count does not match the
    /// column count.
    pub fn with_weights(mut self, weights: Vec<u32>) -> crate::error::Result<Self> {
        if weights.len() != self.children.len() {
            return Err(crate::error::Error::Config(format!(
                "expected {} weights, got {}",
                self.children.len(),
                weights.len()
            )));
        }
        self.weights = weights;
        Ok(self)
    }

    /// Set the gutter width between columns.
    #[must_use]
    pub const fn with_gutter(mut self, gutter: usize) -> Self {
        self.gutter = gutter;
        self
    }

    /// Total gutter cells for the current column count.
    fn gutter_total(&self) -> usize {
        self.gutter * self.children.len().saturating_sub(1)
    }

    /// Negotiate per-column widths for the given available width.
    fn column_widths(&self, ctx: &RenderContext, max_width: usize) -> Vec<usize> {
        let available = max_width.saturating_sub(self.gutter_total());
        let minimums: Vec<usize> = self
            .children
            .iter()
            .map(|c| c.measure(ctx, available).min)
            .collect();
        ratio_distribute(available, &self.weights, &minimums)
    }
}

impl Renderable for Columns {
    fn measure(&self, ctx: &RenderContext, max_width: usize) -> Measurement {
        let mut min = self.gutter_total();
        let mut max = self.gutter_total();
        for child in &self.children {
            let m = child.measure(ctx, max_width);
            min += m.min;
            max += m.max;
        }
        Measurement::new(min, max).clamp(max_width)
    }

    fn render(&self, ctx: &RenderContext, max_width: usize) -> Vec<Segment> {
        if max_width == 0 || self.children.is_empty() {
            return Vec::new();
        }
        let widths = self.column_widths(ctx, max_width);

        // Render each child into its slice.
        let columns: Vec<Vec<SegmentLine>> = self
            .children
            .iter()
            .zip(&widths)
            .map(|(child, &w)| split_lines(child.render(ctx, w)))
            .collect();
        let height = columns.iter().map(Vec::len).max().unwrap_or(0);

        // Zip lines into rows, padding every cell to its column width.
        let mut rows = Vec::with_capacity(height);
        for row in 0..height {
            let mut segments = Vec::new();
            for (col, lines) in columns.iter().enumerate() {
                if col > 0 && self.gutter > 0 {
                    segments.push(Segment::plain(" ".repeat(self.gutter)));
                }
                let width = widths[col];
                match lines.get(row) {
                    Some(line) => {
                        let used = line.cell_width(ctx.unicode);
                        segments.extend(line.segments.iter().cloned());
                        if used < width {
                            segments.push(Segment::plain(" ".repeat(width - used)));
                        }
                    }
                    None => segments.push(Segment::plain(" ".repeat(width))),
                }
            }
            rows.push(SegmentLine::from(segments));
        }
        if let Some(h) = ctx.height {
            rows = shape_to_height(rows, h);
        }
        join_lines(rows)
    }
}
