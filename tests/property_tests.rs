// Property tests for the tape, bracket pairing and jump strategies

use proptest::prelude::*;
use tapetty::interpreter::engine::{Engine, StepEvent};
use tapetty::memory::Tape;
use tapetty::program::{BracketTable, JumpStrategy};

const STEP_BUDGET: usize = 2_000;

/// Bracket-balanced programs without input, with newlines and comment text mixed in
fn program() -> impl Strategy<Value = String> {
    let leaf = prop::sample::select(vec!["+", "-", ">", "<", ".", "\n", " ", "x"])
        .prop_map(str::to_string);
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(|parts| parts.concat()),
            prop::collection::vec(inner, 0..8).prop_map(|parts| format!("[{}]", parts.concat())),
        ]
    })
}

/// What a run produced: output bytes, final cells, counted instructions
type Outcome = (Vec<u8>, Vec<u8>, u64);

/// Straightforward interpreter to compare against, one character per step
fn reference_run(source: &str, tape_size: usize) -> Outcome {
    let code: Vec<char> = source.chars().collect();
    let mut cells = vec![0u8; tape_size];
    let mut ptr = 0usize;
    let mut cp = 0usize;
    let mut output = Vec::new();
    let mut executed = 0u64;

    for _ in 0..STEP_BUDGET {
        if cp >= code.len() {
            break;
        }
        if "+-<>.,[]".contains(code[cp]) {
            executed += 1;
        }
        match code[cp] {
            '+' => cells[ptr] = cells[ptr].wrapping_add(1),
            '-' => cells[ptr] = cells[ptr].wrapping_sub(1),
            '>' => ptr = (ptr + 1) % tape_size,
            '<' => ptr = (ptr + tape_size - 1) % tape_size,
            '.' => output.push(cells[ptr]),
            '[' if cells[ptr] == 0 => {
                let mut depth = 1;
                while depth > 0 {
                    cp += 1;
                    match code[cp] {
                        '[' => depth += 1,
                        ']' => depth -= 1,
                        _ => {}
                    }
                }
            }
            ']' if cells[ptr] != 0 => {
                let mut depth = 1;
                while depth > 0 {
                    cp -= 1;
                    match code[cp] {
                        ']' => depth += 1,
                        '[' => depth -= 1,
                        _ => {}
                    }
                }
            }
            _ => {}
        }
        cp += 1;
    }

    (output, cells, executed)
}

fn engine_run(engine: &mut Engine) -> Outcome {
    let mut output = Vec::new();
    for _ in 0..STEP_BUDGET {
        match engine.step() {
            Some(step) => {
                if let StepEvent::Output(byte) = step.event {
                    output.push(byte);
                }
            }
            None => break,
        }
    }
    (output, engine.tape().cells().to_vec(), engine.executed())
}

proptest! {
    #[test]
    fn prop_256_increments_restore_cell(
        cells in prop::collection::vec(any::<u8>(), 1..16),
        at in 0usize..16,
    ) {
        let mut tape = Tape::from_cells(cells.clone());
        for _ in 0..at % cells.len() {
            tape.advance();
        }
        let before = tape.read();
        for _ in 0..256 {
            tape.increment();
        }
        prop_assert_eq!(tape.read(), before);
        prop_assert_eq!(tape.cells(), cells.as_slice());
    }

    #[test]
    fn prop_pointer_wraps(len in 1usize..128) {
        let mut tape = Tape::new(len);
        tape.retreat();
        prop_assert_eq!(tape.pointer(), len - 1);
        tape.advance();
        prop_assert_eq!(tape.pointer(), 0);

        for _ in 0..len {
            tape.advance();
        }
        prop_assert_eq!(tape.pointer(), 0);
    }

    #[test]
    fn prop_bracket_pairs_are_symmetric(source in program()) {
        let code: Vec<char> = source.chars().collect();
        let table = BracketTable::build(&code).expect("Generated programs are balanced");

        for (pos, &c) in code.iter().enumerate() {
            match c {
                '[' | ']' => {
                    let partner = table.partner(pos).expect("Every bracket has a partner");
                    prop_assert_eq!(table.partner(partner), Some(pos));
                    prop_assert_eq!(code[partner], if c == '[' { ']' } else { '[' });
                    prop_assert_eq!(c == '[', partner > pos);
                }
                _ => prop_assert_eq!(table.partner(pos), None),
            }
        }
    }

    #[test]
    fn prop_stray_close_is_rejected(source in program()) {
        let code: Vec<char> = format!("{}]", source).chars().collect();
        prop_assert!(BracketTable::build(&code).is_err());
    }

    #[test]
    fn prop_strategies_step_identically(source in program(), tape_size in 1usize..8) {
        let mut table =
            Engine::new(&source, tape_size, JumpStrategy::Precomputed).expect("Load failed");
        let mut scan = Engine::new(&source, tape_size, JumpStrategy::Scan).expect("Load failed");

        for _ in 0..STEP_BUDGET {
            let (a, b) = (table.step(), scan.step());
            prop_assert_eq!(a, b);
            prop_assert_eq!(table.lines(), scan.lines());
            if a.is_none() {
                break;
            }
        }
    }

    #[test]
    fn prop_matches_reference_interpreter(source in program(), tape_size in 1usize..8) {
        let mut engine =
            Engine::new(&source, tape_size, JumpStrategy::default()).expect("Load failed");
        prop_assert_eq!(engine_run(&mut engine), reference_run(&source, tape_size));
    }
}
