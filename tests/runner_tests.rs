// Headless runs of complete programs against a scripted terminal

use tapetty::interpreter::engine::Engine;
use tapetty::interpreter::errors::RunError;
use tapetty::program::source::ProgramSource;
use tapetty::program::JumpStrategy;
use tapetty::settings::Settings;
use tapetty::terminal::scripted::ScriptedTerminal;
use tapetty::terminal::Key;
use tapetty::ui::runner::run_program;
use tapetty::ui::ScreenLayout;

const HELLO: &str = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.\n\
                     +++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";

/// Where the stats line starts: one space after the " terminal " title
const STATS_AT: &str = "\x1b[6;115H";

fn layout() -> ScreenLayout {
    ScreenLayout::new(&Settings::default(), (200, 50))
}

fn lines(text: &str) -> Vec<String> {
    ProgramSource::from_text(text).lines
}

/// Guest bytes as they appear on the wire: each between a cursor restore and save
fn guest_byte(byte: char) -> String {
    format!("\x1b8{}\x1b7", byte)
}

#[test]
fn test_hello_world_run() {
    let mut io = ScriptedTerminal::new();
    io.set_cursor(110, 7);

    let stats = run_program(&mut io, &layout(), &lines(HELLO), JumpStrategy::default())
        .expect("Run failed");

    let mut engine = Engine::new(&lines(HELLO).join("\n"), 64, JumpStrategy::default())
        .expect("Program should load");
    engine.run_to_halt(|| None).expect("Run failed");
    assert_eq!(stats.instructions, engine.executed());

    let output = io.output_string();
    for c in "Hello World!".chars() {
        assert!(output.contains(&guest_byte(c)), "missing {:?}", c);
    }
    assert!(output.contains(&format!(" {} ins.", stats.instructions)));
    assert!(output.contains(" memory "));
    assert!(output.contains(" code "));
    assert!(output.contains(" terminal "));
    // The trailing newline is the only line break
    assert_eq!(io.queries(), 1);
}

#[test]
fn test_input_comes_from_keys() {
    let mut io = ScriptedTerminal::with_keys([Key::Up, Key::Char('q')]);

    let stats = run_program(&mut io, &layout(), &lines(",."), JumpStrategy::default())
        .expect("Run failed");

    assert_eq!(stats.instructions, 2);
    let output = io.output_string();
    assert!(output.contains(&guest_byte('q')));
    assert!(output.contains("\x1b[?25h"));
    // The cell shows the key's code
    assert!(output.contains("71\x1b[0m"));
}

#[test]
fn test_input_unavailable_aborts() {
    let mut io = ScriptedTerminal::new();
    let result = run_program(&mut io, &layout(), &lines("+,."), JumpStrategy::default());
    assert!(matches!(result, Err(RunError::InputUnavailable)));
}

#[test]
fn test_bad_cursor_reply_aborts() {
    let mut io = ScriptedTerminal::new();
    io.set_cursor_reply(b"\x1b[oops");

    let result = run_program(
        &mut io,
        &layout(),
        &lines("++++++++++."),
        JumpStrategy::default(),
    );
    assert!(matches!(result, Err(RunError::TerminalProtocol(_))));
}

#[test]
fn test_malformed_program_draws_nothing_live() {
    let mut io = ScriptedTerminal::new();
    let result = run_program(&mut io, &layout(), &lines("+[\n-"), JumpStrategy::default());

    match result {
        Err(RunError::MalformedProgram { line, column, .. }) => assert_eq!((line, column), (1, 2)),
        other => panic!("Expected MalformedProgram, got {:?}", other),
    }
    assert!(!io.output_string().contains("\x1b7"));
}

#[test]
fn test_strategies_draw_the_same() {
    let source = lines("++[>+\n<-]>.");
    let mut table = ScriptedTerminal::new();
    let mut scan = ScriptedTerminal::new();

    run_program(&mut table, &layout(), &source, JumpStrategy::Precomputed).expect("Run failed");
    run_program(&mut scan, &layout(), &source, JumpStrategy::Scan).expect("Run failed");

    // Everything up to the stats line, whose timing differs between runs
    let before_stats = |out: String| {
        let end = out.rfind(STATS_AT).expect("Stats line should be drawn");
        out[..end].to_string()
    };
    assert_eq!(
        before_stats(table.output_string()),
        before_stats(scan.output_string())
    );
}
