//! The bracket-tag markup mini-language.
//!
//! Markup is plain text interspersed with `[style words]...[/]` tags;
//! `[[` and `]]` are literal escaped brackets. Parsing is a single
//! left-to-right scan with a stack of open styles, each already combined
//! with its ancestors, so a segment's style is resolved the moment its text
//! is seen.
//!
//! # Examples
//!
//! ```
//! use tapestry::markup;
//!
//! let segments = markup::parse("[bold red]error:[/] disk full").unwrap();
//! assert_eq!(segments.len(), 2);
//!
//! assert_eq!(markup::escape("Hello [World]"), "Hello [[World]]");
//! ```

use crate::error::{Error, Result};
use crate::segment::Segment;
use crate::style::Style;

/// One lexical event in a markup string.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Event {
    /// Unescaped literal text.
    Text(String),
    /// `[body]` tag open; carries the raw body and the char position of
    /// its `[`.
    Open(String, usize),
    /// `[/]` close; carries the char position of its `[`.
    Close(usize),
}

/// Tokenize markup into events.
///
/// Positions in errors are 0-based character positions where the scan
/// stopped: the offending nested `[` for a bracket inside a tag body, the
/// end of input for an unterminated tag.
fn tokenize(markup: &str) -> Result<Vec<Event>> {
    let chars: Vec<char> = markup.chars().collect();
    let mut events = Vec::new();
    let mut text = String::new();
    let mut i = 0usize;

    while i < chars.len() {
        match chars[i] {
            '[' => {
                if chars.get(i + 1) == Some(&'[') {
                    text.push('[');
                    i += 2;
                    continue;
                }
                if !text.is_empty() {
                    events.push(Event::Text(std::mem::take(&mut text)));
                }
                let open_pos = i;
                let mut j = i + 1;
                loop {
                    match chars.get(j) {
                        None => {
                            return Err(Error::Markup {
                                position: j,
                                message: "malformed tag: unterminated '['".to_string(),
                            });
                        }
                        Some('[') => {
                            return Err(Error::Markup {
                                position: j,
                                message: "malformed tag: '[' inside tag body".to_string(),
                            });
                        }
                        Some(']') => break,
                        Some(_) => j += 1,
                    }
                }
                let body: String = chars[i + 1..j].iter().collect();
                if let Some(rest) = body.strip_prefix('/') {
                    if !rest.is_empty() {
                        return Err(Error::Markup {
                            position: open_pos,
                            message: format!("malformed closing tag [/{rest}]"),
                        });
                    }
                    events.push(Event::Close(open_pos));
                } else {
                    events.push(Event::Open(body, open_pos));
                }
                i = j + 1;
            }
            ']' => {
                if chars.get(i + 1) == Some(&']') {
                    text.push(']');
                    i += 2;
                } else {
                    // A lone ']' outside any tag is literal.
                    text.push(']');
                    i += 1;
                }
            }
            c => {
                text.push(c);
                i += 1;
            }
        }
    }
    if !text.is_empty() {
        events.push(Event::Text(text));
    }
    Ok(events)
}

/// Parse markup into styled segments.
///
/// Text inside `[...]...[/]` spans carries the tag's style combined with
/// all ancestor tags. Multi-line text produces [`Segment::LineBreak`]s.
/// A failing parse emits no segments.
///
/// # Errors
///
/// [`Error::Markup`] with the 0-based character position of the fault for
/// malformed tags, a `[/]` with nothing open, unclosed tags at end of
/// input, or an invalid style word in a tag body.
pub fn parse(markup: &str) -> Result<Vec<Segment>> {
    let events = tokenize(markup)?;
    let mut segments = Vec::new();
    let mut stack: Vec<Style> = Vec::new();
    let total_chars = markup.chars().count();

    for event in events {
        match event {
            Event::Open(body, pos) => {
                let style = Style::parse(&body).map_err(|e| Error::Markup {
                    position: pos,
                    message: e.to_string(),
                })?;
                let resolved = match stack.last() {
                    Some(parent) => Style::combine(parent, &style),
                    None => style,
                };
                stack.push(resolved);
            }
            Event::Close(pos) => {
                if stack.pop().is_none() {
                    return Err(Error::Markup {
                        position: pos,
                        message: "closing tag when none was expected".to_string(),
                    });
                }
            }
            Event::Text(text) => {
                let style = stack.last().cloned().unwrap_or_default();
                // Bare `link`: the span's text doubles as the URL.
                let style = if style.link.as_deref() == Some("") {
                    let mut s = style;
                    s.link = Some(text.replace('\n', ""));
                    s
                } else {
                    style
                };
                segments.extend(Segment::text_lines(&text, &style));
            }
        }
    }

    if !stack.is_empty() {
        return Err(Error::Markup {
            position: total_chars,
            message: "unbalanced markup stack: unclosed tag at end of input".to_string(),
        });
    }
    Ok(segments)
}

/// Escape literal brackets so text round-trips through the parser.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '[' => out.push_str("[["),
            ']' => out.push_str("]]"),
            c => out.push(c),
        }
    }
    out
}

/// Strip tags without style resolution, for plain-text extraction.
///
/// Lenient: malformed trailing tags are dropped rather than reported.
#[must_use]
pub fn remove(markup: &str) -> String {
    let chars: Vec<char> = markup.chars().collect();
    let mut out = String::with_capacity(markup.len());
    let mut i = 0usize;
    while i < chars.len() {
        match chars[i] {
            '[' => {
                if chars.get(i + 1) == Some(&'[') {
                    out.push('[');
                    i += 2;
                } else {
                    // Skip to the closing ']' (or end of input).
                    let mut j = i + 1;
                    while j < chars.len() && chars[j] != ']' {
                        j += 1;
                    }
                    i = j + 1;
                }
            }
            ']' => {
                out.push(']');
                i += if chars.get(i + 1) == Some(&']') { 2 } else { 1 };
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Wrap the first case-insensitive occurrence of `needle` in a new
/// `[style]...[/]` tag.
///
/// The match runs over the rendered plain text, so it may span tag
/// boundaries; each text chunk the span crosses is wrapped independently,
/// splitting crossed tags minimally while keeping nesting balanced.
/// Returns the input unchanged if `needle` is empty or absent.
///
/// # Errors
///
/// [`Error::Markup`] if `markup` does not parse.
pub fn highlight(markup: &str, needle: &str, style: &str) -> Result<String> {
    let events = tokenize(markup)?;
    if needle.is_empty() {
        return Ok(markup.to_string());
    }

    let plain: Vec<char> = events
        .iter()
        .filter_map(|e| match e {
            Event::Text(t) => Some(t.chars()),
            _ => None,
        })
        .flatten()
        .collect();
    let needle_chars: Vec<char> = needle.chars().collect();

    let Some(start) = find_ignore_case(&plain, &needle_chars) else {
        return Ok(markup.to_string());
    };
    let end = start + needle_chars.len();

    let mut out = String::with_capacity(markup.len() + style.len() + 8);
    let mut offset = 0usize;
    for event in &events {
        match event {
            Event::Open(body, _) => {
                out.push('[');
                out.push_str(body);
                out.push(']');
            }
            Event::Close(_) => out.push_str("[/]"),
            Event::Text(text) => {
                let len = text.chars().count();
                let chunk_start = offset;
                let chunk_end = offset + len;
                offset = chunk_end;

                let lo = start.max(chunk_start);
                let hi = end.min(chunk_end);
                if lo >= hi {
                    out.push_str(&escape(text));
                    continue;
                }
                let chars: Vec<char> = text.chars().collect();
                let pre: String = chars[..lo - chunk_start].iter().collect();
                let mid: String = chars[lo - chunk_start..hi - chunk_start].iter().collect();
                let post: String = chars[hi - chunk_start..].iter().collect();
                out.push_str(&escape(&pre));
                out.push('[');
                out.push_str(style);
                out.push(']');
                out.push_str(&escape(&mid));
                out.push_str("[/]");
                out.push_str(&escape(&post));
            }
        }
    }
    Ok(out)
}

/// First index where `needle` matches `haystack` ignoring case, or None.
fn find_ignore_case(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&start| {
        needle
            .iter()
            .zip(&haystack[start..])
            .all(|(n, h)| n.to_lowercase().eq(h.to_lowercase()))
    })
}
