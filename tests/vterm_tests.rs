// Integration tests for the virtual terminal's escape sequence rewriting

use tapetty::terminal::scripted::ScriptedTerminal;
use tapetty::vterm::{ParseState, VirtualTerminal, Window};

/// Output window at column 104, row 7, 40 columns by 20 rows (bottom row 26)
fn setup(cursor: (u16, u16)) -> (VirtualTerminal, ScriptedTerminal) {
    let mut io = ScriptedTerminal::new();
    io.set_cursor(cursor.0, cursor.1);
    (VirtualTerminal::new(Window::new(104, 7, 40, 20)), io)
}

fn feed(vterm: &mut VirtualTerminal, io: &mut ScriptedTerminal, bytes: &[u8]) {
    for &byte in bytes {
        vterm.feed(byte, io).expect("Feed failed");
    }
}

#[test]
fn test_cursor_up_clamps_to_window_top() {
    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, b"\x1b[5A");
    assert_eq!(io.output_string(), "\x1b[7d");
}

#[test]
fn test_cursor_up_within_window_is_forwarded() {
    let (mut vterm, mut io) = setup((110, 20));
    feed(&mut vterm, &mut io, b"\x1b[2A");
    assert_eq!(io.output_string(), "\x1b[2A");
}

#[test]
fn test_cursor_left_clamps_to_window_edge() {
    let (mut vterm, mut io) = setup((106, 9));
    feed(&mut vterm, &mut io, b"\x1b[D\x1b[9D");
    // One column is fine, nine would leave the window
    assert_eq!(io.output_string(), "\x1b[D\x1b[104G");
}

#[test]
fn test_cursor_down_clamps_to_window_bottom() {
    let (mut vterm, mut io) = setup((110, 26));
    feed(&mut vterm, &mut io, b"\x1b[1B");
    assert_eq!(io.output_string(), "\x1b[26d");
}

#[test]
fn test_cursor_down_within_window_is_forwarded() {
    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, b"\x1b[2B");
    assert_eq!(io.output_string(), "\x1b[2B");
}

#[test]
fn test_cursor_right_clamps_to_window_edge() {
    let (mut vterm, mut io) = setup((143, 9));
    feed(&mut vterm, &mut io, b"\x1b[1C");
    assert_eq!(io.output_string(), "\x1b[143G");
}

#[test]
fn test_cursor_right_within_window_is_forwarded() {
    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, b"\x1b[3C");
    assert_eq!(io.output_string(), "\x1b[3C");
}

#[test]
fn test_next_line_returns_to_left_edge() {
    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, b"\x1b[2E");
    assert_eq!(io.output_string(), "\x1b[2B\x1b[104G");
}

#[test]
fn test_next_line_clamps_to_bottom_left() {
    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, b"\x1b[30E");
    assert_eq!(io.output_string(), "\x1b[26;104H");
}

#[test]
fn test_previous_line_returns_to_left_edge() {
    let (mut vterm, mut io) = setup((110, 20));
    feed(&mut vterm, &mut io, b"\x1b[2F");
    assert_eq!(io.output_string(), "\x1b[2A\x1b[104G");
}

#[test]
fn test_previous_line_clamps_to_top_left() {
    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, b"\x1b[5F");
    assert_eq!(io.output_string(), "\x1b[7;104H");
}

#[test]
fn test_absolute_moves_are_window_relative() {
    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, b"\x1b[2;3H\x1b[5G\x1b[99d\x1b[f");
    assert_eq!(
        io.output_string(),
        "\x1b[8;106H\x1b[108G\x1b[26d\x1b[7;104H"
    );
    assert_eq!(io.queries(), 0);
}

#[test]
fn test_style_reset_leaves_bare_literal() {
    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, b"\x1b[31ma\x1b[44mb\x1b[0mc");
    assert_eq!(
        io.output_string(),
        "\x1b[31ma\x1b[0m\x1b[31m\x1b[44mb\x1b[0mc"
    );
    assert!(vterm.styles().is_plain());
}

#[test]
fn test_other_sgr_is_forwarded() {
    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, b"\x1b[1;31mx");
    assert_eq!(io.output_string(), "\x1b[1;31mx");
    assert!(vterm.styles().is_plain());
}

#[test]
fn test_crlf_is_one_break() {
    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, b"\r\n");
    assert_eq!(io.output_string(), "\x1b[1B\x1b[104G");
    assert_eq!(io.queries(), 1);
}

#[test]
fn test_repeated_line_endings_collapse() {
    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, b"\n\n");
    assert_eq!(io.output_string(), "\x1b[1B\x1b[104G");
    assert_eq!(io.queries(), 1);

    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, b"\n\n\n");
    assert_eq!(io.output_string(), "\x1b[1B\x1b[104G\x1b[1B\x1b[104G");
    assert_eq!(io.queries(), 2);

    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, b"\r\r");
    assert_eq!(io.output_string(), "\x1b[1B\x1b[104G");
}

#[test]
fn test_literal_between_line_endings_breaks_again() {
    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, b"\nA\n");
    assert_eq!(io.output_string(), "\x1b[1B\x1b[104GA\x1b[1B\x1b[104G");
}

#[test]
fn test_break_on_bottom_row_stays_there() {
    let (mut vterm, mut io) = setup((130, 26));
    feed(&mut vterm, &mut io, b"\n");
    assert_eq!(io.output_string(), "\x1b[104G");
}

#[test]
fn test_unknown_sequence_forwarded() {
    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, b"\x1b[2J\x1b[?25l");
    assert_eq!(io.output_string(), "\x1b[2J\x1b[?25l");
}

#[test]
fn test_spurious_escape_is_literal() {
    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, b"\x1bX");
    assert_eq!(io.output_string(), "\x1bX");
    assert_eq!(vterm.state(), ParseState::Normal);
}

#[test]
fn test_overlong_sequence_is_flushed() {
    let (mut vterm, mut io) = setup((110, 9));
    let mut bytes = b"\x1b[".to_vec();
    bytes.extend(std::iter::repeat(b'1').take(30));
    feed(&mut vterm, &mut io, &bytes);

    assert_eq!(io.output(), bytes.as_slice());
    assert_eq!(vterm.state(), ParseState::Normal);
}

#[test]
fn test_backspace_stops_at_left_edge() {
    let (mut vterm, mut io) = setup((104, 9));
    feed(&mut vterm, &mut io, b"\x08");
    assert!(io.output().is_empty());

    io.set_cursor(105, 9);
    feed(&mut vterm, &mut io, b"\x08");
    assert_eq!(io.output(), b"\x08");
}

#[test]
fn test_high_bytes_print_as_latin1() {
    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, &[0xe9]);
    assert_eq!(io.output_string(), "é");
}

#[test]
fn test_write_byte_restores_and_saves_cursor() {
    let (mut vterm, mut io) = setup((110, 9));
    vterm.begin(&mut io).expect("Begin failed");
    vterm.write_byte(b'A', &mut io).expect("Write failed");
    assert_eq!(io.output_string(), "\x1b[7;104H\x1b7\x1b8A\x1b7");
}

#[test]
fn test_malformed_cursor_reply_is_reported() {
    let (mut vterm, mut io) = setup((110, 9));
    io.set_cursor_reply(b"garbage");
    let result = vterm.feed(b'\n', &mut io);
    assert!(matches!(
        result,
        Err(tapetty::interpreter::errors::RunError::TerminalProtocol(_))
    ));
}

#[test]
fn test_vertical_tab_and_form_feed_are_dropped() {
    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, b"\x0b\x0c");
    assert_eq!(io.output_string(), "");
    assert_eq!(io.queries(), 0);
}

#[test]
fn test_tab_stops_at_window_edge() {
    let (mut vterm, mut io) = setup((110, 9));
    feed(&mut vterm, &mut io, b"\t");
    assert_eq!(io.output_string(), "\t");

    let (mut vterm, mut io) = setup((140, 9));
    feed(&mut vterm, &mut io, b"\t");
    assert_eq!(io.output_string(), "\x1b[143G");
}
