//! Live regions: flicker-free in-place redraw.
//!
//! A [`Live`] session owns a screen region and redraws it by moving the
//! cursor back to the region start and overwriting, never by clearing the
//! screen — except when the terminal shrinks, which invalidates the cursor
//! arithmetic and forces one full clear-and-redraw. The tracked [`Shape`]
//! only ever inflates during a session so the controller always knows the
//! tallest area it must clear or restore.

use crate::ansi::sequences;
use crate::console::Console;
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};
use crate::pipeline::RenderHook;
use crate::renderable::{Measurement, RenderContext, Renderable};
use crate::segment::{Segment, SegmentLine, split_lines};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Last-known rendered footprint of a live region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Shape {
    /// Width in cells.
    pub width: usize,
    /// Height in rows.
    pub height: usize,
}

impl Shape {
    /// Component-wise maximum of two shapes.
    #[must_use]
    pub fn inflate(self, other: Self) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

/// What to do when live content is taller than the terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    /// Emit everything; the terminal scrolls.
    Visible,
    /// Drop lines from the cropped edge.
    Crop,
    /// Drop lines and mark the cropped edge with an ellipsis line.
    #[default]
    Ellipsis,
}

/// Which edge loses lines when cropping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cropping {
    /// Drop leading lines; the bottom of the content stays visible.
    Top,
    /// Drop trailing lines; the top of the content stays visible.
    #[default]
    Bottom,
}

/// Apply an overflow policy to rendered lines.
///
/// Returns the (possibly reduced) lines and whether overflow occurred.
fn apply_overflow(
    lines: Vec<SegmentLine>,
    max_height: usize,
    overflow: Overflow,
    cropping: Cropping,
    unicode: bool,
) -> (Vec<SegmentLine>, bool) {
    if lines.len() <= max_height || max_height == 0 {
        return (lines, false);
    }
    let mut lines = lines;
    match overflow {
        Overflow::Visible => (lines, true),
        Overflow::Crop => {
            match cropping {
                Cropping::Bottom => lines.truncate(max_height),
                Cropping::Top => {
                    lines.drain(..lines.len() - max_height);
                }
            }
            (lines, true)
        }
        Overflow::Ellipsis => {
            let keep = max_height - 1;
            let ellipsis =
                SegmentLine::from(vec![Segment::plain(if unicode { "…" } else { "..." })]);
            match cropping {
                Cropping::Bottom => {
                    lines.truncate(keep);
                    lines.push(ellipsis);
                }
                Cropping::Top => {
                    lines.drain(..lines.len() - keep);
                    lines.insert(0, ellipsis);
                }
            }
            (lines, true)
        }
    }
}

/// Mutable per-session state shared between the session handle and its
/// hook. Refreshes from the user callback and from outside both funnel
/// through this mutex.
struct LiveState {
    renderable: Option<Box<dyn Renderable + Send>>,
    shape: Option<Shape>,
    last_size: Option<(u16, u16)>,
    overflow: Overflow,
    cropping: Cropping,
    overflowed: bool,
}

impl LiveState {
    fn new(renderable: Box<dyn Renderable + Send>) -> Self {
        Self {
            renderable: Some(renderable),
            shape: None,
            last_size: None,
            overflow: Overflow::default(),
            cropping: Cropping::default(),
            overflowed: false,
        }
    }

    /// Segments for one frame, including the cursor repositioning over the
    /// previous frame and per-line erase so stale cells never survive.
    fn frame(&mut self, ctx: &RenderContext, force_visible: bool) -> Vec<Segment> {
        let size = ctx.console_size;
        let mut segments = Vec::new();

        // A shrink in either dimension invalidates the incremental cursor
        // math: clear everything and draw from home instead.
        if let Some(last) = self.last_size {
            if size.0 < last.0 || size.1 < last.1 {
                emit_log(
                    LogLevel::Warn,
                    "console shrank during live session; full redraw",
                );
                segments.push(Segment::control(sequences::CLEAR_SCREEN));
                segments.push(Segment::control(sequences::CURSOR_HOME));
                self.shape = None;
            }
        }
        self.last_size = Some(size);

        // Overwrite in place: back to column 0, up over the previous
        // frame. Not a full clear — that is what causes flicker.
        if let Some(prev) = self.shape {
            segments.push(Segment::control(sequences::CARRIAGE_RETURN));
            if prev.height > 1 {
                segments.push(Segment::control(sequences::cursor_up(prev.height - 1)));
            }
        }

        let width = size.0 as usize;
        let lines = match &self.renderable {
            Some(r) => split_lines(r.render(ctx, width)),
            None => Vec::new(),
        };
        let overflow = if force_visible {
            Overflow::Visible
        } else {
            self.overflow
        };
        let (mut lines, overflowed) =
            apply_overflow(lines, size.1 as usize, overflow, self.cropping, ctx.unicode);
        self.overflowed = overflowed;

        let natural = Shape {
            width: lines
                .iter()
                .map(|l| l.cell_width(ctx.unicode))
                .max()
                .unwrap_or(0),
            height: lines.len(),
        };
        let shape = natural.inflate(self.shape.unwrap_or_default());
        // Pad to the inflated height so rows from a taller previous frame
        // are overwritten (and erased) too.
        while lines.len() < shape.height {
            lines.push(SegmentLine::new());
        }
        self.shape = Some(shape);

        let count = lines.len();
        for (i, line) in lines.into_iter().enumerate() {
            segments.extend(line.segments);
            segments.push(Segment::control(sequences::CLEAR_LINE_RIGHT));
            if i + 1 < count {
                segments.push(Segment::LineBreak);
            }
        }
        segments
    }

    /// Segments erasing exactly the inflated region, bottom to top.
    ///
    /// The cursor sits at the end of the region's last row after a frame.
    fn clear_segments(&self) -> Vec<Segment> {
        let Some(shape) = self.shape else {
            return Vec::new();
        };
        if shape.height == 0 {
            return Vec::new();
        }
        let mut segments = vec![
            Segment::control(sequences::CARRIAGE_RETURN),
            Segment::control(sequences::CLEAR_LINE),
        ];
        for _ in 1..shape.height {
            segments.push(Segment::control(sequences::cursor_up(1)));
            segments.push(Segment::control(sequences::CLEAR_LINE));
        }
        segments
    }
}

/// Erases the live region and resets its shape so content printed during
/// the session scrolls in above a freshly drawn frame.
struct LiveClear {
    state: Arc<Mutex<LiveState>>,
}

impl Renderable for LiveClear {
    fn measure(&self, _ctx: &RenderContext, _max_width: usize) -> Measurement {
        Measurement::fixed(0)
    }

    fn render(&self, _ctx: &RenderContext, _max_width: usize) -> Vec<Segment> {
        let Ok(mut state) = self.state.lock() else {
            return Vec::new();
        };
        let Some(prev) = state.shape.take() else {
            return Vec::new();
        };
        let mut segments = vec![Segment::control(sequences::CARRIAGE_RETURN)];
        if prev.height > 1 {
            segments.push(Segment::control(sequences::cursor_up(prev.height - 1)));
        }
        segments.push(Segment::control(sequences::CLEAR_BELOW));
        segments
    }
}

/// Draws the live region's current frame.
struct LiveFrame {
    state: Arc<Mutex<LiveState>>,
}

impl Renderable for LiveFrame {
    fn measure(&self, _ctx: &RenderContext, _max_width: usize) -> Measurement {
        Measurement::fixed(0)
    }

    fn render(&self, ctx: &RenderContext, _max_width: usize) -> Vec<Segment> {
        let Ok(mut state) = self.state.lock() else {
            return Vec::new();
        };
        state.frame(ctx, false)
    }
}

/// Hook keeping the live region below anything printed mid-session.
struct LiveHook {
    state: Arc<Mutex<LiveState>>,
}

impl RenderHook for LiveHook {
    fn process(
        &mut self,
        _ctx: &RenderContext,
        renderables: Vec<Box<dyn Renderable>>,
    ) -> Vec<Box<dyn Renderable>> {
        let mut out: Vec<Box<dyn Renderable>> = Vec::with_capacity(renderables.len() + 2);
        out.push(Box::new(LiveClear {
            state: Arc::clone(&self.state),
        }));
        out.extend(renderables);
        out.push(Box::new(LiveFrame {
            state: Arc::clone(&self.state),
        }));
        out
    }

    fn is_exclusive(&self) -> bool {
        true
    }
}

/// A live display session over a console.
///
/// The session pushes an exclusive hook for its lexical duration and
/// restores the cursor and terminal state on [`Live::stop`] — or on drop,
/// so early returns and panics in the caller never leave the cursor
/// hidden.
pub struct Live<'c, W: Write> {
    console: &'c mut Console<W>,
    state: Arc<Mutex<LiveState>>,
    auto_clear: bool,
    started: bool,
}

impl<'c, W: Write> Live<'c, W> {
    /// Create a session showing `renderable` on `console`.
    pub fn new(console: &'c mut Console<W>, renderable: impl Renderable + Send + 'static) -> Self {
        Self {
            console,
            state: Arc::new(Mutex::new(LiveState::new(Box::new(renderable)))),
            auto_clear: false,
            started: false,
        }
    }

    /// Set the overflow policy (default [`Overflow::Ellipsis`]).
    #[must_use]
    pub fn with_overflow(self, overflow: Overflow) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.overflow = overflow;
        }
        self
    }

    /// Set which edge is cropped (default [`Cropping::Bottom`]).
    #[must_use]
    pub fn with_cropping(self, cropping: Cropping) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.cropping = cropping;
        }
        self
    }

    /// Erase the region when the session ends instead of leaving the last
    /// frame on screen.
    #[must_use]
    pub const fn with_auto_clear(mut self, auto_clear: bool) -> Self {
        self.auto_clear = auto_clear;
        self
    }

    /// Start the session: hide the cursor, claim the console, draw the
    /// first frame.
    ///
    /// # Errors
    ///
    /// [`Error::NotInteractive`] on a non-interactive or non-ANSI profile;
    /// [`Error::LiveSessionActive`] if this session or another live-style
    /// session is already running on the console.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Err(Error::LiveSessionActive);
        }
        let profile = self.console.profile();
        if !profile.interactive || !profile.ansi {
            return Err(Error::NotInteractive);
        }
        self.console.push_hook(Box::new(LiveHook {
            state: Arc::clone(&self.state),
        }))?;
        self.started = true;
        self.console
            .write_segments(&[Segment::control(sequences::CURSOR_HIDE)])?;
        self.refresh()
    }

    /// Print markup above the live region.
    ///
    /// The content scrolls in where the region was while the region itself
    /// is redrawn below it, pinned in place.
    ///
    /// # Errors
    ///
    /// Markup parse errors and sink I/O errors.
    pub fn print(&mut self, source: &str) -> Result<()> {
        self.console.print(source)
    }

    /// Record a new terminal size and redraw at it.
    ///
    /// A shrink in either dimension invalidates the incremental cursor
    /// math, so the next frame clears the screen and redraws from home;
    /// growth keeps the in-place redraw.
    ///
    /// # Errors
    ///
    /// Sink I/O errors.
    pub fn set_size(&mut self, width: u16, height: u16) -> Result<()> {
        self.console.set_size(width, height);
        self.refresh()
    }

    /// Replace the displayed renderable and redraw.
    ///
    /// # Errors
    ///
    /// Sink I/O errors.
    pub fn update(&mut self, renderable: impl Renderable + Send + 'static) -> Result<()> {
        if let Ok(mut state) = self.state.lock() {
            state.renderable = Some(Box::new(renderable));
        }
        self.refresh()
    }

    /// Redraw the current frame in place.
    ///
    /// Serialized through the session mutex, so a refresh triggered from
    /// inside the user's callback and one from outside cannot interleave.
    ///
    /// # Errors
    ///
    /// Sink I/O errors.
    pub fn refresh(&mut self) -> Result<()> {
        if !self.started {
            return Ok(());
        }
        let ctx = self.console.render_context();
        let segments = match self.state.lock() {
            Ok(mut state) => state.frame(&ctx, false),
            Err(_) => Vec::new(),
        };
        self.console.write_segments(&segments)
    }

    /// End the session, restoring the terminal.
    ///
    /// With auto-clear, erases exactly the inflated shape. Otherwise, if
    /// the final frame overflowed, draws it once more fully visible so the
    /// complete content is left on screen; a trailing newline moves past
    /// the region either way.
    ///
    /// # Errors
    ///
    /// Sink I/O errors.
    pub fn stop(&mut self) -> Result<()> {
        self.finish()
    }

    fn finish(&mut self) -> Result<()> {
        if !self.started {
            return Ok(());
        }
        self.started = false;

        let ctx = self.console.render_context();
        let mut segments = match self.state.lock() {
            Ok(mut state) => {
                if self.auto_clear {
                    state.clear_segments()
                } else if state.overflowed {
                    let mut segments = state.frame(&ctx, true);
                    segments.push(Segment::LineBreak);
                    segments
                } else {
                    vec![Segment::LineBreak]
                }
            }
            Err(_) => vec![Segment::LineBreak],
        };
        segments.push(Segment::control(sequences::CURSOR_SHOW));

        let write_result = self.console.write_segments(&segments);
        self.console.pop_hook();
        write_result
    }
}

impl<W: Write> Drop for Live<'_, W> {
    fn drop(&mut self) {
        // Cursor visibility and the hook must be restored even when the
        // caller unwinds mid-session.
        let _ = self.finish();
    }
}
