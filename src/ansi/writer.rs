//! Buffered segment-to-bytes writer.
//!
//! Converts [`Segment`] streams into ANSI output honoring a [`Profile`]:
//! styles become SGR runs downgraded to the profile's color system, links
//! become OSC 8 pairs with monotonically increasing ids, and everything
//! escape-shaped is suppressed when ANSI is off while plain text still
//! flows through.

use crate::ansi::sequences;
use crate::color::{Color, ColorSystem};
use crate::profile::Profile;
use crate::segment::Segment;
use crate::style::{Decoration, Style};
use std::collections::HashMap;
use std::io::{self, Write};

/// Buffered writer converting segments to terminal bytes.
pub struct AnsiWriter<W: Write> {
    writer: W,
    buffer: Vec<u8>,
    profile: Profile,

    // OSC 8 state: currently open link URL, allocated ids, next id.
    current_link: Option<String>,
    link_ids: HashMap<String, u32>,
    next_link_id: u32,
}

impl<W: Write> AnsiWriter<W> {
    /// Create a writer targeting the given sink with the given profile.
    pub fn new(writer: W, profile: Profile) -> Self {
        Self {
            writer,
            buffer: Vec::with_capacity(8192),
            profile,
            current_link: None,
            link_ids: HashMap::new(),
            next_link_id: 1,
        }
    }

    /// The profile this writer renders for.
    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Mutable access to the profile, for size updates on resize.
    pub fn profile_mut(&mut self) -> &mut Profile {
        &mut self.profile
    }

    /// Write a raw string to the buffer (bypasses profile gating).
    pub fn write_str(&mut self, s: &str) {
        self.buffer.extend_from_slice(s.as_bytes());
    }

    /// Write one segment.
    pub fn write_segment(&mut self, segment: &Segment) {
        match segment {
            Segment::LineBreak => {
                self.close_link();
                self.buffer.push(b'\n');
            }
            Segment::Control(bytes) => {
                // Raw escapes are meaningless (and harmful) off-terminal.
                if self.profile.ansi {
                    self.buffer.extend_from_slice(bytes.as_bytes());
                }
            }
            Segment::Text { text, style } => {
                self.sync_link(style.link.as_deref());
                let sgr = if self.profile.ansi {
                    sgr_params(style, self.profile.color_system)
                } else {
                    Vec::new()
                };
                if !sgr.is_empty() {
                    self.buffer.extend_from_slice(b"\x1b[");
                    for (i, code) in sgr.iter().enumerate() {
                        if i > 0 {
                            self.buffer.push(b';');
                        }
                        self.buffer.extend_from_slice(code.as_bytes());
                    }
                    self.buffer.push(b'm');
                }
                self.buffer.extend_from_slice(text.as_bytes());
                if !sgr.is_empty() {
                    self.buffer.extend_from_slice(sequences::RESET.as_bytes());
                }
            }
        }
    }

    /// Write a sequence of segments.
    pub fn write_segments<'a>(&mut self, segments: impl IntoIterator<Item = &'a Segment>) {
        for segment in segments {
            self.write_segment(segment);
        }
        self.close_link();
    }

    /// Open/close OSC 8 links to match the segment's style.
    fn sync_link(&mut self, url: Option<&str>) {
        if !self.profile.ansi || !self.profile.links {
            return;
        }
        if self.current_link.as_deref() == url {
            return;
        }
        self.close_link();
        if let Some(url) = url {
            if url.is_empty() {
                return;
            }
            let id = match self.link_ids.get(url) {
                Some(&id) => id,
                None => {
                    let id = self.next_link_id;
                    self.next_link_id += 1;
                    self.link_ids.insert(url.to_string(), id);
                    id
                }
            };
            let open = sequences::hyperlink_open(id, url);
            self.buffer.extend_from_slice(open.as_bytes());
            self.current_link = Some(url.to_string());
        }
    }

    /// Close any open OSC 8 link.
    fn close_link(&mut self) {
        if self.current_link.take().is_some() {
            self.buffer
                .extend_from_slice(sequences::HYPERLINK_CLOSE.as_bytes());
        }
    }

    /// Flush the buffer to the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.write_all(&self.buffer)?;
        self.buffer.clear();
        self.writer.flush()
    }

    /// Get a reference to the unflushed buffer.
    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the writer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// SGR parameter list for a style under the given color system.
///
/// Decorations come first in numeric order, then foreground, then
/// background. An empty result means no SGR run is needed.
#[must_use]
pub fn sgr_params(style: &Style, color_system: ColorSystem) -> Vec<String> {
    let mut codes = Vec::new();
    let d = style.decoration;
    for (flag, code) in [
        (Decoration::BOLD, "1"),
        (Decoration::DIM, "2"),
        (Decoration::ITALIC, "3"),
        (Decoration::UNDERLINE, "4"),
        (Decoration::BLINK, "5"),
        (Decoration::REVERSE, "7"),
        (Decoration::CONCEAL, "8"),
        (Decoration::STRIKETHROUGH, "9"),
    ] {
        if d.contains(flag) {
            codes.push(code.to_string());
        }
    }
    if let Some(fg) = style.fg {
        codes.extend(color_params(fg.downgrade(color_system), true));
    }
    if let Some(bg) = style.bg {
        codes.extend(color_params(bg.downgrade(color_system), false));
    }
    codes
}

/// SGR parameters selecting a single color.
fn color_params(color: Color, foreground: bool) -> Vec<String> {
    match color {
        Color::Default => Vec::new(),
        Color::Standard(n) => {
            let base = if foreground { 30 } else { 40 };
            let code = if n < 8 {
                base + u16::from(n)
            } else {
                base + 60 + u16::from(n) - 8
            };
            vec![code.to_string()]
        }
        Color::EightBit(n) => {
            let selector = if foreground { "38" } else { "48" };
            vec![selector.to_string(), "5".to_string(), n.to_string()]
        }
        Color::TrueColor(r, g, b) => {
            let selector = if foreground { "38" } else { "48" };
            vec![
                selector.to_string(),
                "2".to_string(),
                r.to_string(),
                g.to_string(),
                b.to_string(),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(segments: &[Segment], profile: Profile) -> String {
        let mut writer = AnsiWriter::new(Vec::new(), profile);
        writer.write_segments(segments);
        let _ = writer.flush();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_text_passthrough() {
        let out = render(&[Segment::plain("hello")], Profile::default());
        assert_eq!(out, "hello");
    }

    #[test]
    fn test_styled_segment_sgr_and_reset() {
        let style = Style::parse("bold red").unwrap();
        let out = render(&[Segment::styled("x", style)], Profile::default());
        assert_eq!(out, "\x1b[1;31mx\x1b[0m");
    }

    #[test]
    fn test_truecolor_sgr() {
        let style = Style::fg(Color::TrueColor(1, 2, 3));
        let out = render(&[Segment::styled("x", style)], Profile::default());
        assert_eq!(out, "\x1b[38;2;1;2;3mx\x1b[0m");
    }

    #[test]
    fn test_color_downgraded_to_profile() {
        let style = Style::fg(Color::TrueColor(255, 0, 0));
        let profile = Profile::default().with_color_system(ColorSystem::Standard);
        let out = render(&[Segment::styled("x", style)], profile);
        // Bright red is palette entry 9 -> SGR 90 + (9-8) = 91.
        assert_eq!(out, "\x1b[91mx\x1b[0m");
    }

    #[test]
    fn test_ansi_off_strips_everything() {
        let style = Style::parse("bold red link=https://e.com").unwrap();
        let segments = [
            Segment::styled("x", style),
            Segment::control("\x1b[2K"),
            Segment::LineBreak,
        ];
        let out = render(&segments, Profile::plain());
        assert_eq!(out, "x\n");
    }

    #[test]
    fn test_link_ids_monotonic() {
        let a = Style::plain().with_link("https://a.example");
        let b = Style::plain().with_link("https://b.example");
        let segments = [
            Segment::styled("a", a.clone()),
            Segment::styled("b", b),
            Segment::styled("a2", a),
        ];
        let out = render(&segments, Profile::default());
        assert!(out.contains("\x1b]8;id=1;https://a.example\x1b\\"));
        assert!(out.contains("\x1b]8;id=2;https://b.example\x1b\\"));
        // The same URL reuses its id.
        assert_eq!(out.matches("id=1;").count(), 2);
    }

    #[test]
    fn test_link_closed_at_line_break() {
        let style = Style::plain().with_link("https://e.com");
        let out = render(
            &[Segment::styled("x", style), Segment::LineBreak],
            Profile::default(),
        );
        let close_pos = out.find("\x1b]8;;\x1b\\").unwrap();
        let newline_pos = out.find('\n').unwrap();
        assert!(close_pos < newline_pos);
    }

    #[test]
    fn test_links_disabled() {
        let style = Style::plain().with_link("https://e.com");
        let profile = Profile::default().with_links(false);
        let out = render(&[Segment::styled("x", style)], profile);
        assert!(!out.contains("]8;"));
        assert!(out.contains('x'));
    }

    #[test]
    fn test_no_colors_system_drops_colors_keeps_decorations() {
        let style = Style::parse("bold red").unwrap();
        let profile = Profile::default().with_color_system(ColorSystem::NoColors);
        let out = render(&[Segment::styled("x", style)], profile);
        assert_eq!(out, "\x1b[1mx\x1b[0m");
    }
}
