//! Output capability profile.
//!
//! The core never sniffs the environment: callers describe the target
//! terminal with a [`Profile`] and hand it to the console. The default is a
//! capable modern terminal; builders narrow it down.

use crate::color::ColorSystem;

/// Capabilities of the output target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    /// Whether ANSI escape sequences may be emitted at all.
    pub ansi: bool,
    /// Color capability.
    pub color_system: ColorSystem,
    /// Terminal width in cells.
    pub width: u16,
    /// Terminal height in rows.
    pub height: u16,
    /// Whether Unicode cell-width accounting applies.
    pub unicode: bool,
    /// Whether the target is an interactive terminal (live sessions
    /// require this).
    pub interactive: bool,
    /// Whether OSC 8 hyperlinks are supported.
    pub links: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            ansi: true,
            color_system: ColorSystem::TrueColor,
            width: 80,
            height: 24,
            unicode: true,
            interactive: true,
            links: true,
        }
    }
}

impl Profile {
    /// A profile for plain non-terminal output (piped files, logs):
    /// no ANSI, no color, not interactive.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            ansi: false,
            color_system: ColorSystem::NoColors,
            width: 80,
            height: 24,
            unicode: true,
            interactive: false,
            links: false,
        }
    }

    /// Copy with a different size.
    #[must_use]
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Copy with a different color system.
    #[must_use]
    pub fn with_color_system(mut self, color_system: ColorSystem) -> Self {
        self.color_system = color_system;
        self
    }

    /// Copy with ANSI output enabled or disabled.
    #[must_use]
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Copy with Unicode width accounting enabled or disabled.
    #[must_use]
    pub fn with_unicode(mut self, unicode: bool) -> Self {
        self.unicode = unicode;
        self
    }

    /// Copy with interactivity enabled or disabled.
    #[must_use]
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Copy with hyperlink support enabled or disabled.
    #[must_use]
    pub fn with_links(mut self, links: bool) -> Self {
        self.links = links;
        self
    }

    /// Console size as a tuple.
    #[must_use]
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}
