// tapetty: tape machine interpreter with live memory and output visualization

use std::error::Error;
use std::io;
use std::path::PathBuf;

use ratatui::{Terminal, backend::CrosstermBackend};

use tapetty::logging;
use tapetty::program::source::{self, ProgramSource};
use tapetty::settings::{Command, Settings, USAGE};
use tapetty::terminal::crossterm_io::{enter_screen, restore_screen};
use tapetty::terminal::CrosstermTerminal;
use tapetty::ui::picker::Picker;
use tapetty::ui::{App, ScreenLayout};

fn main() -> Result<(), Box<dyn Error>> {
    let settings = match Settings::from_args(std::env::args().skip(1)) {
        Ok(Command::Run(settings)) => settings,
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    logging::init(settings.log_file.as_deref())?;

    let path = &settings.program_path;
    if !path.exists() {
        eprintln!("Error: '{}' not found", path.display());
        eprintln!();
        eprintln!("{}", USAGE);
        std::process::exit(1);
    }

    // Read everything from disk before the screen is taken over
    let programs = if path.is_dir() {
        Some(source::discover(path)?)
    } else {
        None
    };
    let program = match &programs {
        None => Some(ProgramSource::load(path)?),
        Some(found) if found.is_empty() => Some(ProgramSource::empty()),
        Some(_) => None,
    };

    enter_screen()?;
    let res = run_session(&settings, programs.unwrap_or_default(), program);
    restore_screen()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Pick a program if none was given, then edit and run it until quit
fn run_session(
    settings: &Settings,
    programs: Vec<PathBuf>,
    program: Option<ProgramSource>,
) -> Result<(), Box<dyn Error>> {
    let mut term = CrosstermTerminal::stdout(settings.input_mode);

    let program = match program {
        Some(program) => program,
        None => {
            let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
            match Picker::new(&programs).run(&mut terminal, &mut term)? {
                Some(chosen) => ProgramSource::load(&chosen)?,
                None => return Ok(()),
            }
        }
    };

    let screen = crossterm::terminal::size()?;
    let layout = ScreenLayout::new(settings, screen);

    let mut app = App::new(term, layout, settings.jump_strategy, program);
    app.run()?;

    Ok(())
}
