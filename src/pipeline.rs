//! Render pipeline hooks.
//!
//! A hook chain wraps the base "write segments to the device" operation.
//! Each hook may inject, reorder, or replace the outgoing renderable
//! stream; the live controller uses this to keep its region below anything
//! printed during a session. Hooks are scoped to a session's lifetime and
//! live-style (exclusive) hooks never nest.

use crate::error::{Error, Result};
use crate::renderable::{RenderContext, Renderable};

/// A transform over the outgoing renderable stream.
pub trait RenderHook {
    /// Transform the renderables about to be written.
    fn process(
        &mut self,
        ctx: &RenderContext,
        renderables: Vec<Box<dyn Renderable>>,
    ) -> Vec<Box<dyn Renderable>>;

    /// Exclusive hooks drive the cursor (live displays, prompts) and
    /// cannot run concurrently on one console.
    fn is_exclusive(&self) -> bool {
        false
    }
}

/// Ordered chain of active hooks.
#[derive(Default)]
pub struct HookChain {
    hooks: Vec<Box<dyn RenderHook>>,
}

impl HookChain {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a hook onto the chain.
    ///
    /// # Errors
    ///
    /// [`Error::LiveSessionActive`] if `hook` is exclusive and an exclusive
    /// hook is already active.
    pub fn push(&mut self, hook: Box<dyn RenderHook>) -> Result<()> {
        if hook.is_exclusive() && self.has_exclusive() {
            return Err(Error::LiveSessionActive);
        }
        self.hooks.push(hook);
        Ok(())
    }

    /// Pop the most recently pushed hook.
    pub fn pop(&mut self) -> Option<Box<dyn RenderHook>> {
        self.hooks.pop()
    }

    /// Whether an exclusive hook is active.
    #[must_use]
    pub fn has_exclusive(&self) -> bool {
        self.hooks.iter().any(|h| h.is_exclusive())
    }

    /// Number of active hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run the stream through every hook in push order.
    pub fn process(
        &mut self,
        ctx: &RenderContext,
        renderables: Vec<Box<dyn Renderable>>,
    ) -> Vec<Box<dyn Renderable>> {
        let mut stream = renderables;
        for hook in &mut self.hooks {
            stream = hook.process(ctx, stream);
        }
        stream
    }
}
