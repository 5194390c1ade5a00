//! Text rendering for menu reports.
//!
//! Each function turns query results into the lines the console prints.
//! Nothing here reads input or touches the terminal, so every report can be
//! checked as a plain string.

use std::borrow::Cow;
use std::fmt::Write as _;

use indexmap::IndexMap;
use log::warn;
use unicode_width::UnicodeWidthStr;

use crate::core::query::{self, Comparison, Leader, RaceMatch};
use crate::core::store::{Category, DataStore, Driver, Race, StandingEntry, StandingsKind};

/// Display name for an id, or `Unknown (<id>)` when the dataset has a
/// dangling reference.
pub fn entity_label<'a>(store: &'a DataStore, category: Category, id: &str) -> Cow<'a, str> {
    match query::get_entity_name(store, category, id) {
        Ok(name) => Cow::Borrowed(name),
        Err(e) => {
            warn!("Dangling reference in dataset: {}", e);
            Cow::Owned(format!("Unknown ({id})"))
        }
    }
}

/// Left-aligns `text` to `width` terminal columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

fn column_width<'a>(cells: impl IntoIterator<Item = &'a str>) -> usize {
    cells.into_iter().map(UnicodeWidthStr::width).max().unwrap_or(0)
}

pub fn standings_report(
    store: &DataStore,
    season: &str,
    kind: StandingsKind,
    entries: &[StandingEntry],
) -> String {
    let (title, category) = match kind {
        StandingsKind::Drivers => ("Driver", Category::Drivers),
        StandingsKind::Teams => ("Team", Category::Teams),
    };

    let mut out = format!("\n{title} Standings for {season}:\n");
    if entries.is_empty() {
        out.push_str("No standings recorded.\n");
        return out;
    }

    let names: Vec<Cow<str>> = entries
        .iter()
        .map(|entry| entity_label(store, category, &entry.entity_id))
        .collect();
    let width = column_width(names.iter().map(|n| &**n));

    for (rank, (entry, name)) in entries.iter().zip(&names).enumerate() {
        let _ = writeln!(out, "{}. {} - {} points", rank + 1, pad(name, width), entry.points);
    }
    out
}

pub fn race_results_report(store: &DataStore, season: &str, race_name: &str, race: &Race) -> String {
    let mut out = format!("\nResults for {race_name} in {season}:\n");
    if race.results.is_empty() {
        out.push_str("No results recorded.\n");
        return out;
    }

    let rows: Vec<(u32, String, u32)> = race
        .results
        .iter()
        .map(|result| {
            let driver = entity_label(store, Category::Drivers, &result.driver_id);
            let team = entity_label(store, Category::Teams, &result.team_id);
            (result.position, format!("{driver} ({team})"), result.points)
        })
        .collect();
    let width = column_width(rows.iter().map(|(_, who, _)| who.as_str()));

    for (position, who, points) in &rows {
        let _ = writeln!(out, "{position}. {} - {points} points", pad(who, width));
    }
    out
}

/// Ends with a blank line after the verdict.
pub fn comparison_report(first_name: &str, second_name: &str, comparison: &Comparison) -> String {
    let mut out = format!("\nComparing {first_name} and {second_name}:\n");
    let _ = writeln!(out, "{first_name} total points: {}", comparison.first_total);
    let _ = writeln!(out, "{second_name} total points: {}", comparison.second_total);
    match comparison.leader {
        Leader::First => {
            let _ = writeln!(out, "{first_name} has more points.");
        }
        Leader::Second => {
            let _ = writeln!(out, "{second_name} has more points.");
        }
        Leader::Tie => out.push_str("Both drivers have equal points.\n"),
    }
    out.push('\n');
    out
}

pub fn calendar_report(season: &str, races: &IndexMap<String, Race>) -> String {
    let mut out = format!("\nRace Calendar for {season}:\n");
    if races.is_empty() {
        out.push_str("No races recorded.\n");
    }
    for (race_name, race) in races {
        let _ = writeln!(out, "{}: {race_name}", race.date);
    }
    out
}

pub fn driver_profile_report(store: &DataStore, driver: &Driver) -> String {
    let team = entity_label(store, Category::Teams, &driver.team_id);
    format!(
        "\nDriver Profile: {}\nNationality: {}\nTeam: {team}\n",
        driver.name, driver.nationality
    )
}

pub fn search_report(location: &str, matches: &[RaceMatch<'_>]) -> String {
    let mut out = format!("\nRaces in '{location}':\n");
    for hit in matches {
        let _ = writeln!(out, "{} - {} ({})", hit.date, hit.race_name, hit.season);
    }
    out
}
