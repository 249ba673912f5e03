// Execution engine for the tape machine

use crate::interpreter::errors::RunError;
use crate::interpreter::lines::{CodeLocation, LineIndex};
use crate::memory::Tape;
use crate::program::brackets::{scan_match, BracketTable, JumpStrategy};
use crate::program::Instruction;
use tracing::debug;

/// Where the engine is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    /// Suspended on `,` until [`Engine::provide_input`] is called
    AwaitingInput,
    /// The instruction pointer is past the last instruction
    Halted,
}

/// The visible side effect of one instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    CellChanged { index: usize, value: u8 },
    PointerMoved { from: usize, to: usize },
    Output(u8),
    InputRequested,
    /// A bracket jumped; the instruction pointer continues after `to`
    Jumped { to: usize },
    /// A bracket whose condition did not hold
    FellThrough,
    NoOp,
}

/// One executed instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Index of the instruction in the sequence
    pub position: usize,
    /// Where the instruction is drawn in the code window
    pub location: CodeLocation,
    pub glyph: char,
    pub instruction: Instruction,
    pub event: StepEvent,
}

/// Runs one instruction sequence against a tape
pub struct Engine {
    /// The instruction sequence, newlines included
    code: Vec<char>,

    tape: Tape,

    /// Instruction pointer
    cp: usize,

    state: EngineState,

    /// Newlines before `cp`, for locating the instruction on screen
    lines: LineIndex,

    /// Bracket pairs, built (and validated) at load time
    brackets: BracketTable,

    /// Positions of every newline, used to keep `lines` current across table jumps
    newlines: Vec<usize>,

    strategy: JumpStrategy,

    /// Executed instructions, newlines and other no-ops excluded
    executed: u64,
}

impl Engine {
    /// Load `source` onto a zeroed tape of `tape_size` cells
    pub fn new(source: &str, tape_size: usize, strategy: JumpStrategy) -> Result<Self, RunError> {
        Engine::with_tape(source, Tape::new(tape_size), strategy)
    }

    /// Load `source` onto an existing tape
    pub fn with_tape(source: &str, tape: Tape, strategy: JumpStrategy) -> Result<Self, RunError> {
        let code: Vec<char> = source.chars().collect();
        let brackets = BracketTable::build(&code)?;
        let newlines = code
            .iter()
            .enumerate()
            .filter_map(|(pos, &c)| (c == '\n').then_some(pos))
            .collect();

        debug!(
            instructions = code.len(),
            loops = brackets.len(),
            ?strategy,
            "engine loaded"
        );

        Ok(Engine {
            state: if code.is_empty() {
                EngineState::Halted
            } else {
                EngineState::Running
            },
            code,
            tape,
            cp: 0,
            lines: LineIndex::new(),
            brackets,
            newlines,
            strategy,
            executed: 0,
        })
    }

    /// Execute the instruction under the instruction pointer.
    ///
    /// Returns `None` once halted. While awaiting input the pending `,` is returned
    /// again without being executed or counted a second time.
    pub fn step(&mut self) -> Option<Step> {
        match self.state {
            EngineState::Halted => return None,
            EngineState::AwaitingInput => {
                return Some(self.step_at(self.cp, StepEvent::InputRequested));
            }
            EngineState::Running => {}
        }

        let position = self.cp;
        let instruction = Instruction::decode(self.code[position]);
        // Located before executing: a newline is drawn on the line it ends
        let step = self.step_at(position, StepEvent::NoOp);

        let event = match instruction {
            Instruction::Increment => {
                self.tape.increment();
                self.cell_changed()
            }
            Instruction::Decrement => {
                self.tape.decrement();
                self.cell_changed()
            }
            Instruction::Right => {
                let from = self.tape.pointer();
                self.tape.advance();
                StepEvent::PointerMoved {
                    from,
                    to: self.tape.pointer(),
                }
            }
            Instruction::Left => {
                let from = self.tape.pointer();
                self.tape.retreat();
                StepEvent::PointerMoved {
                    from,
                    to: self.tape.pointer(),
                }
            }
            Instruction::Output => StepEvent::Output(self.tape.read()),
            Instruction::Input => {
                self.state = EngineState::AwaitingInput;
                return Some(Step {
                    event: StepEvent::InputRequested,
                    ..step
                });
            }
            Instruction::LoopStart if self.tape.read() == 0 => self.jump(position),
            Instruction::LoopEnd if self.tape.read() != 0 => self.jump(position),
            Instruction::LoopStart | Instruction::LoopEnd => StepEvent::FellThrough,
            Instruction::Newline => {
                self.lines.push(position);
                StepEvent::NoOp
            }
            Instruction::Other(_) => StepEvent::NoOp,
        };

        if instruction.is_counted() {
            self.executed += 1;
        }
        self.advance();

        Some(Step { event, ..step })
    }

    /// Complete a pending `,` with `byte`.
    ///
    /// Returns the resulting cell change, or `None` if no input was pending.
    pub fn provide_input(&mut self, byte: u8) -> Option<StepEvent> {
        if self.state != EngineState::AwaitingInput {
            return None;
        }

        self.tape.write(byte);
        self.executed += 1;
        self.state = EngineState::Running;
        self.advance();
        Some(self.cell_changed())
    }

    /// Run to completion without a screen, collecting output bytes.
    ///
    /// `input` supplies bytes for `,`; returning `None` aborts the run with
    /// [`RunError::InputUnavailable`].
    pub fn run_to_halt(
        &mut self,
        mut input: impl FnMut() -> Option<u8>,
    ) -> Result<Vec<u8>, RunError> {
        let mut output = Vec::new();
        while let Some(step) = self.step() {
            match step.event {
                StepEvent::Output(byte) => output.push(byte),
                StepEvent::InputRequested => {
                    let byte = input().ok_or(RunError::InputUnavailable)?;
                    self.provide_input(byte);
                }
                _ => {}
            }
        }
        Ok(output)
    }

    fn step_at(&self, position: usize, event: StepEvent) -> Step {
        let glyph = self.code[position];
        Step {
            position,
            location: self.lines.locate(position),
            glyph,
            instruction: Instruction::decode(glyph),
            event,
        }
    }

    fn cell_changed(&self) -> StepEvent {
        StepEvent::CellChanged {
            index: self.tape.pointer(),
            value: self.tape.read(),
        }
    }

    fn advance(&mut self) {
        self.cp += 1;
        if self.cp >= self.code.len() {
            self.state = EngineState::Halted;
        }
    }

    /// Move the instruction pointer onto the partner of the bracket at `from`
    fn jump(&mut self, from: usize) -> StepEvent {
        let to = match self.strategy {
            JumpStrategy::Scan => scan_match(&self.code, from, &mut self.lines),
            JumpStrategy::Precomputed => {
                let to = self.brackets.partner(from);
                if let Some(to) = to {
                    self.cross_newlines(from, to);
                }
                to
            }
        };

        // Every bracket was paired when the table was built
        let to = to.unwrap_or(from);
        self.cp = to;
        StepEvent::Jumped { to }
    }

    /// Bring the line index up to date after a table jump from `from` to `to`
    fn cross_newlines(&mut self, from: usize, to: usize) {
        let (low, high) = if from < to { (from, to) } else { (to, from) };
        let start = self.newlines.partition_point(|&nl| nl <= low);
        let end = self.newlines.partition_point(|&nl| nl < high);

        if from < to {
            for &nl in &self.newlines[start..end] {
                self.lines.push(nl);
            }
        } else {
            for _ in start..end {
                self.lines.pop();
            }
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Instruction pointer
    pub fn position(&self) -> usize {
        self.cp
    }

    /// Where the next instruction is drawn in the code window
    pub fn location(&self) -> CodeLocation {
        self.lines.locate(self.cp)
    }

    pub fn lines(&self) -> &LineIndex {
        &self.lines
    }

    pub fn executed(&self) -> u64 {
        self.executed
    }
}
