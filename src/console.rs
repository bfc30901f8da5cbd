//! The console: an explicit handle tying a profile, an output sink, and
//! the hook chain together.
//!
//! There is no process-wide console singleton; callers construct one (or
//! more) and pass it where rendering happens. [`Console::stdout`] builds
//! the common case.

use crate::ansi::AnsiWriter;
use crate::ansi::sequences;
use crate::error::Result;
use crate::markup;
use crate::pipeline::{HookChain, RenderHook};
use crate::profile::Profile;
use crate::renderable::{RenderContext, Renderable};
use crate::segment::Segment;
use crate::terminal::stdout_profile;
use crate::text::Text;
use std::io::{self, Write};

/// Terminal output handle.
pub struct Console<W: Write> {
    writer: AnsiWriter<W>,
    hooks: HookChain,
}

impl Console<io::Stdout> {
    /// Console for stdout, profiled for the real terminal (plain profile
    /// when stdout is piped).
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout(), stdout_profile())
    }
}

impl<W: Write> Console<W> {
    /// Create a console writing to `sink` with the given capabilities.
    pub fn new(sink: W, profile: Profile) -> Self {
        Self {
            writer: AnsiWriter::new(sink, profile),
            hooks: HookChain::new(),
        }
    }

    /// The capability profile in effect.
    #[must_use]
    pub fn profile(&self) -> &Profile {
        self.writer.profile()
    }

    /// Record a new terminal size (e.g. after a SIGWINCH).
    ///
    /// Subsequent render contexts pick up the new size; a live session
    /// sees it on its next refresh and reconciles its cursor math.
    pub fn set_size(&mut self, width: u16, height: u16) {
        let profile = self.writer.profile_mut();
        profile.width = width;
        profile.height = height;
    }

    /// Context for a render pass against this console.
    #[must_use]
    pub fn render_context(&self) -> RenderContext {
        let profile = self.profile();
        RenderContext::new(profile.size(), profile.unicode, profile.color_system)
    }

    /// Print markup, wrapped to the console width, followed by a newline.
    ///
    /// # Errors
    ///
    /// Markup parse errors and sink I/O errors.
    pub fn print(&mut self, source: &str) -> Result<()> {
        let text = Text::from_markup(source)?;
        self.print_renderable(text)
    }

    /// Print plain text with no markup interpretation.
    ///
    /// # Errors
    ///
    /// Sink I/O errors.
    pub fn print_plain(&mut self, text: &str) -> Result<()> {
        self.print_renderable(Text::plain(text))
    }

    /// Render a renderable through the hook chain and write it out.
    ///
    /// # Errors
    ///
    /// Sink I/O errors.
    pub fn print_renderable(&mut self, renderable: impl Renderable + 'static) -> Result<()> {
        let ctx = self.render_context();
        let stream = self.hooks.process(&ctx, vec![Box::new(renderable)]);
        for item in stream {
            let segments = item.render(&ctx, ctx.max_width);
            self.writer.write_segments(&segments);
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Write a bare newline.
    ///
    /// # Errors
    ///
    /// Sink I/O errors.
    pub fn line(&mut self) -> Result<()> {
        self.writer.write_segment(&Segment::LineBreak);
        self.writer.flush()?;
        Ok(())
    }

    /// Clear the screen and home the cursor (no-op off-terminal).
    ///
    /// # Errors
    ///
    /// Sink I/O errors.
    pub fn clear(&mut self) -> Result<()> {
        if self.profile().ansi {
            self.writer.write_str(sequences::CLEAR_SCREEN);
            self.writer.write_str(sequences::CURSOR_HOME);
            self.writer.flush()?;
        }
        Ok(())
    }

    /// Push a hook for the duration of a session.
    ///
    /// # Errors
    ///
    /// [`crate::Error::LiveSessionActive`] for a second exclusive hook.
    pub fn push_hook(&mut self, hook: Box<dyn RenderHook>) -> Result<()> {
        self.hooks.push(hook)
    }

    /// Pop the most recent hook.
    pub fn pop_hook(&mut self) -> Option<Box<dyn RenderHook>> {
        self.hooks.pop()
    }

    /// Whether an exclusive (live-style) hook is active.
    #[must_use]
    pub fn live_hook_active(&self) -> bool {
        self.hooks.has_exclusive()
    }

    /// Write raw segments bypassing the hook chain.
    ///
    /// Used by session controllers that own the cursor; ordinary callers
    /// go through [`Console::print_renderable`].
    ///
    /// # Errors
    ///
    /// Sink I/O errors.
    pub fn write_segments(&mut self, segments: &[Segment]) -> Result<()> {
        self.writer.write_segments(segments);
        self.writer.flush()?;
        Ok(())
    }

    /// Escape literal brackets for safe interpolation into markup.
    #[must_use]
    pub fn escape(text: &str) -> String {
        markup::escape(text)
    }

    /// Consume the console, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}
