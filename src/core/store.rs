//! # Data Store
//!
//! The in-memory dataset, decoded once from JSON into typed records and never
//! mutated afterwards.
//!
//! ```text
//! DataStore
//! ├── drivers: IndexMap<id, Driver>     // name, nationality, team_id
//! ├── teams:   IndexMap<id, Team>       // name
//! └── seasons: IndexMap<key, Season>
//!     ├── season_name
//!     ├── standings
//!     │   ├── drivers: [StandingEntry]  // ranking order
//!     │   └── teams:   [StandingEntry]
//!     └── races: IndexMap<name, Race>
//!         ├── location, date
//!         └── results: [RaceResult]     // finishing order
//! ```
//!
//! Every keyed mapping keeps the document's order, so "first match" and
//! season-then-race iteration are stable across loads.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::{Deserialize, Deserializer};

use crate::core::error::StoreError;

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Driver {
    pub name: String,
    pub nationality: String,
    /// References a key in `DataStore::teams`.
    pub team_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Team {
    pub name: String,
}

/// One row of a season ranking. `entity_id` is a driver id in the driver
/// list and a team id in the team list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingEntry {
    pub entity_id: String,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Standings {
    #[serde(deserialize_with = "driver_rows")]
    pub drivers: Vec<StandingEntry>,
    #[serde(deserialize_with = "team_rows")]
    pub teams: Vec<StandingEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RaceResult {
    pub position: u32,
    pub driver_id: String,
    pub team_id: String,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Race {
    pub location: String,
    /// Kept exactly as the dataset spells it.
    pub date: String,
    pub results: Vec<RaceResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Season {
    pub season_name: String,
    pub standings: Standings,
    pub races: IndexMap<String, Race>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataStore {
    pub drivers: IndexMap<String, Driver>,
    pub teams: IndexMap<String, Team>,
    pub seasons: IndexMap<String, Season>,
}

// Standings rows carry a category-specific id field on the wire.

#[derive(Deserialize)]
struct DriverRow {
    driver_id: String,
    points: u32,
}

#[derive(Deserialize)]
struct TeamRow {
    team_id: String,
    points: u32,
}

fn driver_rows<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<StandingEntry>, D::Error> {
    let rows = Vec::<DriverRow>::deserialize(deserializer)?;
    Ok(rows
        .into_iter()
        .map(|row| StandingEntry {
            entity_id: row.driver_id,
            points: row.points,
        })
        .collect())
}

fn team_rows<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<StandingEntry>, D::Error> {
    let rows = Vec::<TeamRow>::deserialize(deserializer)?;
    Ok(rows
        .into_iter()
        .map(|row| StandingEntry {
            entity_id: row.team_id,
            points: row.points,
        })
        .collect())
}

// ============================================================================
// Categories
// ============================================================================

/// The two entity tables an id can be looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Drivers,
    Teams,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Drivers => write!(f, "drivers"),
            Category::Teams => write!(f, "teams"),
        }
    }
}

impl FromStr for Category {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drivers" => Ok(Category::Drivers),
            "teams" => Ok(Category::Teams),
            other => Err(StoreError::NotFound(format!("category '{other}'"))),
        }
    }
}

/// Which ranking of a season to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandingsKind {
    Drivers,
    Teams,
}

/// A borrowed driver or team record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity<'a> {
    Driver(&'a Driver),
    Team(&'a Team),
}

impl<'a> Entity<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            Entity::Driver(driver) => &driver.name,
            Entity::Team(team) => &team.name,
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl DataStore {
    /// Load the dataset from a JSON file.
    ///
    /// A missing or unreadable file is `NotFound`. Content that does not
    /// decode into the typed structure (including non-UTF-8 bytes) is
    /// `Malformed`. Nothing is returned on failure, so callers never see a
    /// partial store.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        info!("Loading dataset from {}", path.display());

        let contents = fs::read_to_string(path).map_err(|e| {
            warn!("Failed to read dataset {}: {}", path.display(), e);
            match e.kind() {
                io::ErrorKind::InvalidData => {
                    StoreError::Malformed(format!("{}: {e}", path.display()))
                }
                _ => StoreError::NotFound(format!("{}: {e}", path.display())),
            }
        })?;

        Self::from_json_str(&contents)
    }

    /// Decode a dataset from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let store: DataStore = serde_json::from_str(json).map_err(|e| {
            warn!("Dataset failed to decode: {}", e);
            StoreError::Malformed(e.to_string())
        })?;
        debug!(
            "Dataset decoded: {} drivers, {} teams, {} seasons",
            store.drivers.len(),
            store.teams.len(),
            store.seasons.len()
        );
        Ok(store)
    }
}
