//! End-to-end live region behavior over an in-memory console.
//!
//! These tests assert on the raw escape stream a session emits: in-place
//! redraw uses cursor movement plus per-line erase, never a screen clear,
//! and teardown restores the cursor and removes exactly the rows the
//! region ever occupied.

use tapestry::live::{Cropping, Live, Overflow};
use tapestry::{Console, Error, Profile, Text};

fn console(width: u16, height: u16) -> Console<Vec<u8>> {
    Console::new(Vec::new(), Profile::default().with_size(width, height))
}

fn output(console: Console<Vec<u8>>) -> String {
    String::from_utf8(console.into_inner()).unwrap()
}

#[test]
fn auto_clear_erases_every_inflated_row() {
    let mut console = console(20, 10);
    {
        let mut live =
            Live::new(&mut console, Text::plain("one\ntwo\nthree")).with_auto_clear(true);
        live.start().unwrap();
        // Content shrinks to one row; the tracked shape stays at three.
        live.update(Text::plain("one")).unwrap();
        live.stop().unwrap();
    }
    let out = output(console);
    // Teardown erases all three previously occupied rows: one erase at
    // the cursor row plus move-up-and-erase for each row above it.
    assert_eq!(out.matches("\x1b[2K").count(), 3);
    assert_eq!(out.matches("\x1b[1A").count(), 2);
    assert!(!out.contains("\x1b[2J"));
}

#[test]
fn redraw_is_incremental_not_screen_clear() {
    let mut console = console(20, 10);
    {
        let mut live = Live::new(&mut console, Text::plain("a\nb\nc"));
        live.start().unwrap();
        live.update(Text::plain("x\ny\nz")).unwrap();
        live.stop().unwrap();
    }
    let out = output(console);
    // The second frame repositions over the three-row frame.
    assert!(out.contains("\r\x1b[2A"));
    assert!(!out.contains("\x1b[2J"));
}

#[test]
fn every_frame_line_is_erased_to_the_right() {
    let mut console = console(20, 10);
    {
        let mut live = Live::new(&mut console, Text::plain("wide line"));
        live.start().unwrap();
        live.update(Text::plain("x")).unwrap();
        live.stop().unwrap();
    }
    let out = output(console);
    assert!(out.matches("\x1b[K").count() >= 2);
}

#[test]
fn cursor_hidden_for_session_duration() {
    let mut console = console(20, 10);
    {
        let mut live = Live::new(&mut console, Text::plain("x"));
        live.start().unwrap();
        live.stop().unwrap();
    }
    let out = output(console);
    let hide = out.find("\x1b[?25l").unwrap();
    let show = out.rfind("\x1b[?25h").unwrap();
    assert!(hide < show);
}

#[test]
fn stop_without_auto_clear_moves_past_region() {
    let mut console = console(20, 10);
    {
        let mut live = Live::new(&mut console, Text::plain("done"));
        live.start().unwrap();
        live.stop().unwrap();
    }
    let out = output(console);
    assert!(out.ends_with("\n\x1b[?25h"));
    assert!(out.contains("done"));
}

#[test]
fn start_fails_off_terminal() {
    let mut console = Console::new(Vec::new(), Profile::plain());
    let mut live = Live::new(&mut console, Text::plain("x"));
    assert!(matches!(live.start(), Err(Error::NotInteractive)));
}

#[test]
fn start_fails_when_not_interactive() {
    let profile = Profile::default().with_interactive(false);
    let mut console = Console::new(Vec::new(), profile);
    let mut live = Live::new(&mut console, Text::plain("x"));
    assert!(matches!(live.start(), Err(Error::NotInteractive)));
}

#[test]
fn printing_during_session_scrolls_above_region() {
    let mut console = console(20, 10);
    {
        let mut live = Live::new(&mut console, Text::plain("status"));
        live.start().unwrap();
        live.print("log entry").unwrap();
        live.stop().unwrap();
    }
    let out = output(console);
    // The printed line lands before the region is redrawn below it, and
    // the old region is wiped with clear-below rather than a screen clear.
    let log_pos = out.find("log entry").unwrap();
    let last_status = out.rfind("status").unwrap();
    assert!(log_pos < last_status);
    assert!(out.contains("\x1b[J"));
    assert!(!out.contains("\x1b[2J"));
}

#[test]
fn tall_content_cropped_with_ellipsis() {
    let mut console = console(20, 3);
    {
        let mut live = Live::new(&mut console, Text::plain("a\nb\nc\nd\ne"))
            .with_auto_clear(true)
            .with_overflow(Overflow::Ellipsis)
            .with_cropping(Cropping::Bottom);
        live.start().unwrap();
        live.stop().unwrap();
    }
    let out = output(console);
    assert!(out.contains('a'));
    assert!(out.contains('b'));
    assert!(out.contains('…'));
    assert!(!out.contains('d'));
}

#[test]
fn overflowed_session_leaves_full_content_on_stop() {
    let mut console = console(20, 3);
    {
        let mut live = Live::new(&mut console, Text::plain("a\nb\nc\nd\ne"));
        live.start().unwrap();
        live.stop().unwrap();
    }
    let out = output(console);
    // The final frame is drawn fully visible so nothing is lost.
    for line in ["a", "b", "c", "d", "e"] {
        assert!(out.contains(line), "missing line {line}");
    }
}

#[test]
fn terminal_shrink_forces_full_clear_and_redraw() {
    let mut console = console(40, 20);
    {
        let mut live = Live::new(&mut console, Text::plain("shrinking"));
        live.start().unwrap();
        live.set_size(30, 20).unwrap();
        live.stop().unwrap();
    }
    let out = output(console);
    // Incremental cursor math is abandoned: clear, home, redraw.
    assert!(out.contains("\x1b[2J\x1b[H"));
    let clear_pos = out.find("\x1b[2J").unwrap();
    let last_frame = out.rfind("shrinking").unwrap();
    assert!(clear_pos < last_frame);
}

#[test]
fn terminal_growth_stays_incremental() {
    let mut console = console(40, 20);
    {
        let mut live = Live::new(&mut console, Text::plain("growing"));
        live.start().unwrap();
        live.set_size(50, 24).unwrap();
        live.stop().unwrap();
    }
    let out = output(console);
    assert!(!out.contains("\x1b[2J"));
}

#[test]
fn drop_without_stop_restores_cursor() {
    let mut console = console(20, 10);
    {
        let mut live = Live::new(&mut console, Text::plain("x"));
        live.start().unwrap();
        // Session dropped mid-flight.
    }
    assert!(!console.live_hook_active());
    assert!(output(console).ends_with("\x1b[?25h"));
}

#[test]
fn stop_is_idempotent() {
    let mut console = console(20, 10);
    {
        let mut live = Live::new(&mut console, Text::plain("x"));
        live.start().unwrap();
        live.stop().unwrap();
        live.stop().unwrap();
    }
    let out = output(console);
    assert_eq!(out.matches("\x1b[?25h").count(), 1);
}
