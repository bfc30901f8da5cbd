//! Width-constrained word wrapping and justification over segment lines.
//!
//! Input lines are already split at explicit breaks; wrapping only decides
//! where whitespace runs become line boundaries. Style boundaries are
//! preserved: a word spanning two differently-styled segments is still one
//! unbreakable unit.

use crate::renderable::Justify;
use crate::segment::{Segment, SegmentLine};
use crate::style::Style;
use crate::width::cell_len;

/// Wrap lines to `max_width` cells.
///
/// Break points are whitespace runs. When a line is flushed, the pending
/// whitespace before the break is dropped (trailing trim) and not carried
/// to the new line (leading suppression). A single unbreakable token longer
/// than `max_width` is emitted on its own overflowing line rather than
/// sliced mid-character.
///
/// `max_width == 0` produces no output.
#[must_use]
pub fn wrap_lines(lines: &[SegmentLine], max_width: usize, unicode: bool) -> Vec<SegmentLine> {
    if max_width == 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    for line in lines {
        wrap_line(line, max_width, unicode, &mut out);
    }
    out
}

/// One chunk of a line: a whitespace or non-whitespace run in one style,
/// or a zero-width control run.
enum Chunk {
    Space(String, Style),
    Word(String, Style),
    Control(String),
}

fn chunks_of(line: &SegmentLine) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    for segment in &line.segments {
        match segment {
            Segment::Control(bytes) => chunks.push(Chunk::Control(bytes.clone())),
            Segment::LineBreak => {}
            Segment::Text { text, style } => {
                let mut rest = text.as_str();
                while !rest.is_empty() {
                    let is_space = rest.starts_with(char::is_whitespace);
                    let end = rest
                        .find(|c: char| c.is_whitespace() != is_space)
                        .unwrap_or(rest.len());
                    let (run, tail) = rest.split_at(end);
                    if is_space {
                        chunks.push(Chunk::Space(run.to_string(), style.clone()));
                    } else {
                        chunks.push(Chunk::Word(run.to_string(), style.clone()));
                    }
                    rest = tail;
                }
            }
        }
    }
    chunks
}

/// Accumulator for wrapping one input line.
struct Wrapper {
    max_width: usize,
    out: Vec<SegmentLine>,
    current: SegmentLine,
    current_width: usize,
    /// Whitespace seen since the last word; committed only if the next
    /// word fits on the same line.
    pending_ws: Vec<Segment>,
    pending_ws_width: usize,
    /// Glued non-breaking run being accumulated (may span styles).
    word: Vec<Segment>,
    word_width: usize,
    /// The current (empty) line was created by a wrap, so leading
    /// whitespace is suppressed. Original line starts keep indentation.
    fresh_wrap: bool,
}

impl Wrapper {
    fn new(max_width: usize) -> Self {
        Self {
            max_width,
            out: Vec::new(),
            current: SegmentLine::new(),
            current_width: 0,
            pending_ws: Vec::new(),
            pending_ws_width: 0,
            word: Vec::new(),
            word_width: 0,
            fresh_wrap: false,
        }
    }

    fn commit_word(&mut self) {
        if self.word.is_empty() {
            return;
        }
        if self.fresh_wrap && self.current.is_empty() {
            self.pending_ws.clear();
            self.pending_ws_width = 0;
        }
        if self.current_width + self.pending_ws_width + self.word_width <= self.max_width {
            self.current.segments.append(&mut self.pending_ws);
            self.current_width += self.pending_ws_width;
            self.current.segments.append(&mut self.word);
            self.current_width += self.word_width;
            self.fresh_wrap = false;
        } else {
            if !self.current.is_empty() {
                self.out.push(std::mem::take(&mut self.current));
                self.current_width = 0;
            }
            self.pending_ws.clear();
            if self.word_width > self.max_width {
                // Unbreakable token wider than the line: overflow alone.
                self.out.push(SegmentLine::from(std::mem::take(&mut self.word)));
                self.fresh_wrap = true;
            } else {
                self.current.segments.append(&mut self.word);
                self.current_width = self.word_width;
                self.fresh_wrap = false;
            }
        }
        self.pending_ws_width = 0;
        self.word_width = 0;
    }

    fn finish(mut self) -> Vec<SegmentLine> {
        self.commit_word();
        // Trailing whitespace is trimmed; empty input lines stay empty
        // lines. An overflow line already emitted leaves nothing to add.
        if !self.current.is_empty() || self.out.is_empty() {
            self.out.push(self.current);
        }
        self.out
    }
}

fn wrap_line(line: &SegmentLine, max_width: usize, unicode: bool, out: &mut Vec<SegmentLine>) {
    let mut wrapper = Wrapper::new(max_width);
    for chunk in chunks_of(line) {
        match chunk {
            Chunk::Word(text, style) => {
                wrapper.word_width += cell_len(&text, unicode);
                wrapper.word.push(Segment::styled(text, style));
            }
            Chunk::Control(bytes) => {
                // Zero width; glued so it stays beside its text.
                wrapper.word.push(Segment::control(bytes));
            }
            Chunk::Space(text, style) => {
                wrapper.commit_word();
                wrapper.pending_ws_width += cell_len(&text, unicode);
                wrapper.pending_ws.push(Segment::styled(text, style));
            }
        }
    }
    out.extend(wrapper.finish());
}

/// Width of the widest unbreakable token across the given lines.
///
/// This is the narrowest width the content wraps into without slicing a
/// word, which is exactly a text renderable's minimum measurement.
#[must_use]
pub fn max_word_width(lines: &[SegmentLine], unicode: bool) -> usize {
    let mut widest = 0usize;
    for line in lines {
        let mut run = 0usize;
        for chunk in chunks_of(line) {
            match chunk {
                Chunk::Word(text, _) => run += cell_len(&text, unicode),
                Chunk::Control(_) => {}
                Chunk::Space(..) => {
                    widest = widest.max(run);
                    run = 0;
                }
            }
        }
        widest = widest.max(run);
    }
    widest
}

/// Apply horizontal justification by padding with plain spaces.
#[must_use]
pub fn justify_line(
    line: SegmentLine,
    width: usize,
    justify: Justify,
    unicode: bool,
) -> SegmentLine {
    let line_width = line.cell_width(unicode);
    let pad = width.saturating_sub(line_width);
    if pad == 0 || matches!(justify, Justify::Left) {
        return line;
    }
    let mut segments = Vec::with_capacity(line.segments.len() + 2);
    match justify {
        Justify::Left => unreachable!(),
        Justify::Right => {
            segments.push(Segment::plain(" ".repeat(pad)));
            segments.extend(line.segments);
        }
        Justify::Center => {
            let left = pad / 2;
            let right = pad - left;
            if left > 0 {
                segments.push(Segment::plain(" ".repeat(left)));
            }
            segments.extend(line.segments);
            segments.push(Segment::plain(" ".repeat(right)));
        }
    }
    SegmentLine::from(segments)
}
