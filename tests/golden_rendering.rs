//! Exact-byte rendering tests.
//!
//! Each case asserts the complete ANSI output for a small render, so any
//! change to SGR encoding, color downgrading, link emission, or layout
//! shows up as a byte-level diff.
//!
//! # Test Categories
//!
//! 1. **Styling**: SGR runs, decorations, reset discipline
//! 2. **Color downgrade**: truecolor through 256/16/no-color profiles
//! 3. **Links**: OSC 8 open/close and id allocation
//! 4. **Layout**: wrapping, justification, column composition

use tapestry::renderable::Justify;
use tapestry::{Color, ColorSystem, Columns, Console, Profile, Renderable, Style, Text};

fn console_with(profile: Profile) -> Console<Vec<u8>> {
    Console::new(Vec::new(), profile)
}

fn console() -> Console<Vec<u8>> {
    console_with(Profile::default().with_size(40, 24))
}

fn output(console: Console<Vec<u8>>) -> String {
    String::from_utf8(console.into_inner()).unwrap()
}

// ============================================================================
// Styling
// ============================================================================

#[test]
fn plain_text_has_no_escapes() {
    let mut console = console();
    console.print("hello").unwrap();
    assert_eq!(output(console), "hello\n");
}

#[test]
fn bold_red_sgr_run() {
    let mut console = console();
    console.print("[bold red]x[/]").unwrap();
    assert_eq!(output(console), "\x1b[1;31mx\x1b[0m\n");
}

#[test]
fn foreground_and_background() {
    let mut console = console();
    console.print("[white on blue]x[/]").unwrap();
    assert_eq!(output(console), "\x1b[37;44mx\x1b[0m\n");
}

#[test]
fn decorations_in_numeric_order() {
    let mut console = console();
    console.print("[underline italic bold]x[/]").unwrap();
    assert_eq!(output(console), "\x1b[1;3;4mx\x1b[0m\n");
}

#[test]
fn styled_and_plain_spans_isolated() {
    let mut console = console();
    console.print("[bold]a[/]b").unwrap();
    // The reset after the styled run keeps the plain tail unstyled.
    assert_eq!(output(console), "\x1b[1ma\x1b[0mb\n");
}

// ============================================================================
// Color downgrade
// ============================================================================

#[test]
fn truecolor_passthrough() {
    let mut console = console();
    console.print("[#ff0000]x[/]").unwrap();
    assert_eq!(output(console), "\x1b[38;2;255;0;0mx\x1b[0m\n");
}

#[test]
fn truecolor_downgraded_to_eight_bit() {
    let profile = Profile::default().with_color_system(ColorSystem::EightBit);
    let mut console = console_with(profile);
    console.print("[#ff0000]x[/]").unwrap();
    // Pure red lands on cube entry 196.
    assert_eq!(output(console), "\x1b[38;5;196mx\x1b[0m\n");
}

#[test]
fn truecolor_downgraded_to_standard() {
    let profile = Profile::default().with_color_system(ColorSystem::Standard);
    let mut console = console_with(profile);
    console.print("[#ff0000]x[/]").unwrap();
    // Bright red (palette 9) encodes as SGR 91.
    assert_eq!(output(console), "\x1b[91mx\x1b[0m\n");
}

#[test]
fn no_colors_keeps_decorations() {
    let profile = Profile::default().with_color_system(ColorSystem::NoColors);
    let mut console = console_with(profile);
    console.print("[bold red]x[/]").unwrap();
    assert_eq!(output(console), "\x1b[1mx\x1b[0m\n");
}

#[test]
fn plain_profile_strips_all_styling() {
    let mut console = console_with(Profile::plain());
    console.print("[bold red on blue]x[/]").unwrap();
    assert_eq!(output(console), "x\n");
}

// ============================================================================
// Links
// ============================================================================

#[test]
fn link_span_emits_osc8_pair() {
    let mut console = console();
    console.print("[link=https://example.com]docs[/]").unwrap();
    assert_eq!(
        output(console),
        "\x1b]8;id=1;https://example.com\x1b\\docs\x1b]8;;\x1b\\\n"
    );
}

#[test]
fn link_ids_allocated_in_first_use_order() {
    let mut console = console();
    console
        .print("[link=https://a.example]a[/] [link=https://b.example]b[/]")
        .unwrap();
    let out = output(console);
    assert!(out.contains("id=1;https://a.example"));
    assert!(out.contains("id=2;https://b.example"));
}

#[test]
fn bare_link_uses_span_text_as_url() {
    let mut console = console();
    console.print("[link]https://example.com[/]").unwrap();
    let out = output(console);
    assert!(out.contains("id=1;https://example.com"));
    assert!(out.contains("\x1b]8;;\x1b\\"));
}

#[test]
fn links_suppressed_when_disabled() {
    let mut console = console_with(Profile::default().with_links(false));
    console.print("[link=https://example.com]docs[/]").unwrap();
    assert_eq!(output(console), "docs\n");
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn wrapping_at_console_width() {
    let mut console = console_with(Profile::default().with_size(10, 24));
    console.print("the quick brown fox").unwrap();
    assert_eq!(output(console), "the quick\nbrown fox\n");
}

#[test]
fn right_justified_text() {
    let mut console = console_with(Profile::default().with_size(6, 24));
    console
        .print_renderable(Text::plain("hi").with_justify(Justify::Right))
        .unwrap();
    assert_eq!(output(console), "    hi\n");
}

#[test]
fn centered_text_odd_pad_right() {
    let mut console = console_with(Profile::default().with_size(7, 24));
    console
        .print_renderable(Text::plain("hi").with_justify(Justify::Center))
        .unwrap();
    assert_eq!(output(console), "  hi   \n");
}

#[test]
fn two_equal_columns() {
    let mut console = console_with(Profile::default().with_size(11, 24));
    let columns = Columns::new(vec![
        Box::new(Text::plain("aa")) as Box<dyn Renderable>,
        Box::new(Text::plain("bb")),
    ]);
    console.print_renderable(columns).unwrap();
    assert_eq!(output(console), "aa    bb   \n");
}

#[test]
fn styles_survive_wrapping() {
    let mut console = console_with(Profile::default().with_size(3, 24));
    console.print("[red]one two[/]").unwrap();
    assert_eq!(
        output(console),
        "\x1b[31mone\x1b[0m\n\x1b[31mtwo\x1b[0m\n"
    );
}

#[test]
fn wide_glyphs_wrap_by_cells() {
    let mut console = console_with(Profile::default().with_size(5, 24));
    console.print("漢字 漢字").unwrap();
    assert_eq!(output(console), "漢字\n漢字\n");
}

#[test]
fn clear_emits_ed2_and_home() {
    let mut console = console();
    console.clear().unwrap();
    assert_eq!(output(console), "\x1b[2J\x1b[H");
}

#[test]
fn styled_helper_matches_markup() {
    let style = Style::fg(Color::Standard(2));
    let mut via_helper = console();
    via_helper
        .print_renderable(Text::styled("ok", &style))
        .unwrap();
    let mut via_markup = console();
    via_markup.print("[green]ok[/]").unwrap();
    assert_eq!(output(via_helper), output(via_markup));
}
