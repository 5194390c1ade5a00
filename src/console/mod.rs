//! # Console Adapter
//!
//! The line-oriented menu. Prints the menu, reads a choice, runs the
//! matching handler, and loops until Exit (or end of input).
//!
//! This is the only module that reads user input or prints reports. It is
//! generic over any `BufRead` + `Write` pair so a whole session can be
//! scripted in tests without a terminal.
//!
//! ```text
//! menu → choice → MenuAction → handler ─┬─ prompt(s)
//!   ▲                                   ├─ core::query
//!   │                                   └─ report::*  → output
//!   └──────────── Flow::Continue ───────┘
//! ```

pub mod action;
pub mod report;

use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::core::query::{self, RaceMatch};
use crate::core::store::{Category, DataStore, Entity, StandingsKind};
use action::{Flow, MenuAction};

pub const WELCOME: &str = "Welcome to the Formula E Fan Explorer!";
pub const FAREWELL: &str = "Thank you for using the Formula E Fan Explorer!";
pub const INVALID_CHOICE: &str = "Invalid choice. Please try again.";

const SEASON_PROMPT: &str = "Enter the season (e.g., '2019-2020'): ";

/// Input/output pair the handlers talk through.
struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Prints `label` and reads one line. `None` means end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Writes an already newline-terminated report.
    fn show(&mut self, report: &str) -> io::Result<()> {
        write!(self.output, "{report}")
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{WELCOME}")?;
        writeln!(self.output, "Choose an option:")?;
        for action in MenuAction::ALL {
            writeln!(self.output, "{}. {}", action.code(), action.label())?;
        }
        Ok(())
    }
}

/// Runs the menu loop until the user exits or input ends.
pub fn run<R: BufRead, W: Write>(store: &DataStore, input: R, output: W) -> io::Result<()> {
    let mut console = Console { input, output };

    loop {
        console.print_menu()?;
        let Some(choice) = console.prompt("Enter your choice: ")? else {
            info!("Input closed at menu, leaving");
            break;
        };

        let flow = match MenuAction::from_choice(&choice) {
            Some(action) => {
                debug!("Menu choice {:?} -> {:?}", choice, action);
                dispatch(store, action, &mut console)?
            }
            None => {
                debug!("Invalid menu choice {:?}", choice);
                console.say(INVALID_CHOICE)?;
                Flow::Continue
            }
        };

        if flow == Flow::Exit {
            break;
        }
    }

    console.output.flush()
}

fn dispatch<R: BufRead, W: Write>(
    store: &DataStore,
    action: MenuAction,
    console: &mut Console<R, W>,
) -> io::Result<Flow> {
    match action {
        MenuAction::ViewDriverStandings => view_standings(store, console, StandingsKind::Drivers),
        MenuAction::ViewTeamStandings => view_standings(store, console, StandingsKind::Teams),
        MenuAction::ViewRaceResults => view_race_results(store, console),
        MenuAction::CompareDrivers => compare_drivers(store, console),
        MenuAction::ViewSeasonCalendar => view_season_calendar(store, console),
        MenuAction::ViewDriverProfile => view_driver_profile(store, console),
        MenuAction::SearchRacesByLocation => search_races_by_location(store, console),
        MenuAction::ExitProgram => {
            info!("Exit chosen");
            console.say(FAREWELL)?;
            Ok(Flow::Exit)
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Reads a prompt or returns `Flow::Exit` from the handler on end of input.
macro_rules! ask {
    ($console:expr, $label:expr) => {
        match $console.prompt($label)? {
            Some(answer) => answer,
            None => {
                info!("Input closed mid-action, leaving");
                return Ok(Flow::Exit);
            }
        }
    };
}

fn view_standings<R: BufRead, W: Write>(
    store: &DataStore,
    console: &mut Console<R, W>,
    kind: StandingsKind,
) -> io::Result<Flow> {
    let season = ask!(console, SEASON_PROMPT);
    match query::get_standings(store, &season, kind) {
        Some(entries) => console.show(&report::standings_report(store, &season, kind, entries))?,
        None => console.say("Season not found.")?,
    }
    Ok(Flow::Continue)
}

fn view_race_results<R: BufRead, W: Write>(
    store: &DataStore,
    console: &mut Console<R, W>,
) -> io::Result<Flow> {
    let season = ask!(console, SEASON_PROMPT);
    let race_name = ask!(console, "Enter the race name (e.g., 'Diriyah E-Prix'): ");
    match query::get_race(store, &season, &race_name) {
        Some(race) => {
            console.show(&report::race_results_report(store, &season, &race_name, race))?
        }
        None => console.say("Race or season not found.")?,
    }
    Ok(Flow::Continue)
}

fn compare_drivers<R: BufRead, W: Write>(
    store: &DataStore,
    console: &mut Console<R, W>,
) -> io::Result<Flow> {
    let first_name = ask!(console, "Enter the first driver's name: ");
    let Some(first_id) = query::find_entity_id_by_name(store, Category::Drivers, &first_name)
    else {
        console.say(&format!("Driver '{first_name}' not found."))?;
        return Ok(Flow::Continue);
    };

    let second_name = ask!(console, "Enter the second driver's name: ");
    let Some(second_id) = query::find_entity_id_by_name(store, Category::Drivers, &second_name)
    else {
        console.say(&format!("Driver '{second_name}' not found."))?;
        return Ok(Flow::Continue);
    };

    let comparison = query::compare_drivers(store, first_id, second_id);
    let first = report::entity_label(store, Category::Drivers, first_id);
    let second = report::entity_label(store, Category::Drivers, second_id);
    console.show(&report::comparison_report(&first, &second, &comparison))?;
    Ok(Flow::Continue)
}

fn view_season_calendar<R: BufRead, W: Write>(
    store: &DataStore,
    console: &mut Console<R, W>,
) -> io::Result<Flow> {
    let season = ask!(console, SEASON_PROMPT);
    match query::get_races(store, &season) {
        Some(races) => console.show(&report::calendar_report(&season, races))?,
        None => console.say("Season not found.")?,
    }
    Ok(Flow::Continue)
}

fn view_driver_profile<R: BufRead, W: Write>(
    store: &DataStore,
    console: &mut Console<R, W>,
) -> io::Result<Flow> {
    let name = ask!(console, "Enter the driver's name: ");
    let profile = query::find_entity_id_by_name(store, Category::Drivers, &name)
        .and_then(|id| query::get_entity_profile(store, Category::Drivers, id).ok());

    match profile {
        Some(Entity::Driver(driver)) => {
            console.show(&report::driver_profile_report(store, driver))?
        }
        _ => console.say("Driver not found.")?,
    }
    Ok(Flow::Continue)
}

fn search_races_by_location<R: BufRead, W: Write>(
    store: &DataStore,
    console: &mut Console<R, W>,
) -> io::Result<Flow> {
    let location = ask!(console, "Enter the location to search for races: ");
    let matches: Vec<RaceMatch> = query::search_races(store, &location).collect();
    debug!("Location search {:?}: {} hit(s)", location, matches.len());

    if matches.is_empty() {
        console.say("No races found at that location.")?;
    } else {
        console.show(&report::search_report(&location, &matches))?;
    }
    Ok(Flow::Continue)
}
