//! One complete, visualized run of a program
//!
//! The runner owns nothing across runs: every call builds a fresh engine, a fresh
//! virtual terminal (empty style slots, parser in `Normal`) and draws the panels
//! from scratch.

use super::chrome;
use super::layout::ScreenLayout;
use super::visualizer::Visualizer;
use crate::interpreter::engine::{Engine, StepEvent};
use crate::interpreter::errors::RunError;
use crate::interpreter::stats::{RunStats, Stopwatch};
use crate::program::JumpStrategy;
use crate::terminal::TerminalIo;
use crate::vterm::VirtualTerminal;
use tracing::{debug, info};

/// Draw the panels, then execute `lines` instruction by instruction
pub fn run_program<T: TerminalIo + ?Sized>(
    io: &mut T,
    layout: &ScreenLayout,
    lines: &[String],
    strategy: JumpStrategy,
) -> Result<RunStats, RunError> {
    chrome::draw_screen(io, layout, lines)?;

    let mut engine = Engine::new(&lines.join("\n"), layout.tape_len, strategy)?;
    let visualizer = Visualizer::new(*layout);
    let mut vterm = VirtualTerminal::new(layout.terminal);

    visualizer.draw_pointer(io, 0)?;
    vterm.begin(io)?;
    io.flush()?;

    info!(tape = layout.tape_len, ?strategy, "run started");
    let mut clock = Stopwatch::start();

    while let Some(step) = engine.step() {
        let highlight = visualizer.highlight(io, &step)?;

        match step.event {
            StepEvent::CellChanged { index, value } => visualizer.draw_cell(io, index, value)?,
            StepEvent::PointerMoved { from, to } => {
                visualizer.erase_pointer(io, from)?;
                visualizer.draw_pointer(io, to)?;
            }
            StepEvent::Output(byte) => vterm.write_byte(byte, io)?,
            StepEvent::InputRequested => {
                vterm.show_input_cursor(io)?;
                clock.pause();
                let byte = read_input_byte(io)?;
                clock.resume();
                vterm.hide_input_cursor(io)?;

                if let Some(StepEvent::CellChanged { index, value }) = engine.provide_input(byte) {
                    visualizer.draw_cell(io, index, value)?;
                }
            }
            StepEvent::Jumped { to } => debug!(from = step.position, to, "jump"),
            StepEvent::FellThrough | StepEvent::NoOp => {}
        }

        if let Some(highlight) = highlight {
            visualizer.unhighlight(io, highlight)?;
        }
        io.flush()?;
    }

    let stats = RunStats {
        instructions: engine.executed(),
        elapsed: clock.elapsed(),
    };
    info!(
        instructions = stats.instructions,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "run finished"
    );

    chrome::draw_stats(io, layout, &stats)?;
    io.flush()?;
    Ok(stats)
}

/// Block until a key that maps to a byte arrives
fn read_input_byte<T: TerminalIo + ?Sized>(io: &mut T) -> Result<u8, RunError> {
    loop {
        if let Some(byte) = io.read_key()?.input_byte() {
            return Ok(byte);
        }
    }
}
