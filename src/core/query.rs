//! # Query Layer
//!
//! Read-only views over a loaded [`DataStore`]. Every function here is pure:
//! no I/O, no interior mutability, same answer for the same store.
//!
//! Keyed entity lookups fail with [`StoreError::NotFound`] because callers
//! pass ids that came out of the store itself. Season, race, and search
//! lookups take user-typed strings, so a miss is an ordinary `None` or an
//! empty iterator.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::core::error::StoreError;
use crate::core::store::{Category, DataStore, Entity, Race, Season, StandingEntry, StandingsKind};

// ============================================================================
// Entity Resolver
// ============================================================================

/// Returns the display name of a driver or team.
pub fn get_entity_name<'a>(
    store: &'a DataStore,
    category: Category,
    id: &str,
) -> Result<&'a str, StoreError> {
    get_entity_profile(store, category, id).map(|entity| entity.name())
}

/// Returns the full record of a driver or team.
pub fn get_entity_profile<'a>(
    store: &'a DataStore,
    category: Category,
    id: &str,
) -> Result<Entity<'a>, StoreError> {
    let entity = match category {
        Category::Drivers => store.drivers.get(id).map(Entity::Driver),
        Category::Teams => store.teams.get(id).map(Entity::Team),
    };
    entity.ok_or_else(|| StoreError::NotFound(format!("{category}/{id}")))
}

/// Finds the id of the first entity in `category` whose name equals `name`,
/// ignoring case.
pub fn find_entity_id_by_name<'a>(
    store: &'a DataStore,
    category: Category,
    name: &str,
) -> Option<&'a str> {
    let wanted = name.to_lowercase();
    let matches = |candidate: &str| candidate.to_lowercase() == wanted;

    match category {
        Category::Drivers => store
            .drivers
            .iter()
            .find(|(_, driver)| matches(driver.name.as_str()))
            .map(|(id, _)| id.as_str()),
        Category::Teams => store
            .teams
            .iter()
            .find(|(_, team)| matches(team.name.as_str()))
            .map(|(id, _)| id.as_str()),
    }
}

// ============================================================================
// Season / Race Accessors
// ============================================================================

pub fn get_season<'a>(store: &'a DataStore, season_key: &str) -> Option<&'a Season> {
    store.seasons.get(season_key)
}

/// Returns a season's ranking in stored order.
pub fn get_standings<'a>(
    store: &'a DataStore,
    season_key: &str,
    kind: StandingsKind,
) -> Option<&'a [StandingEntry]> {
    let standings = &get_season(store, season_key)?.standings;
    Some(match kind {
        StandingsKind::Drivers => standings.drivers.as_slice(),
        StandingsKind::Teams => standings.teams.as_slice(),
    })
}

pub fn get_races<'a>(store: &'a DataStore, season_key: &str) -> Option<&'a IndexMap<String, Race>> {
    get_season(store, season_key).map(|season| &season.races)
}

pub fn get_race<'a>(store: &'a DataStore, season_key: &str, race_name: &str) -> Option<&'a Race> {
    get_races(store, season_key)?.get(race_name)
}

// ============================================================================
// Search & Aggregation
// ============================================================================

/// A race whose location matched a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceMatch<'a> {
    pub season: &'a str,
    pub race_name: &'a str,
    pub date: &'a str,
}

/// Lazily yields every race whose location contains `location`, ignoring
/// case, in season-then-race order. An empty needle matches every race.
pub fn search_races<'a>(
    store: &'a DataStore,
    location: &str,
) -> impl Iterator<Item = RaceMatch<'a>> + use<'a> {
    let needle = location.to_lowercase();

    store
        .seasons
        .iter()
        .flat_map(|(season_key, season)| {
            season
                .races
                .iter()
                .map(move |(race_name, race)| (season_key, race_name, race))
        })
        .filter(move |(_, _, race)| race.location.to_lowercase().contains(&needle))
        .map(|(season_key, race_name, race)| RaceMatch {
            season: season_key.as_str(),
            race_name: race_name.as_str(),
            date: race.date.as_str(),
        })
}

/// Sums a driver's standings points over every season.
///
/// An id with no standings rows, including one that names no driver at
/// all, totals 0.
pub fn calculate_total_points(store: &DataStore, driver_id: &str) -> u64 {
    store
        .seasons
        .values()
        .flat_map(|season| &season.standings.drivers)
        .filter(|entry| entry.entity_id == driver_id)
        .map(|entry| u64::from(entry.points))
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leader {
    First,
    Second,
    Tie,
}

/// Career totals of two drivers side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub first_total: u64,
    pub second_total: u64,
    pub leader: Leader,
}

pub fn compare_drivers(store: &DataStore, first_id: &str, second_id: &str) -> Comparison {
    let first_total = calculate_total_points(store, first_id);
    let second_total = calculate_total_points(store, second_id);
    let leader = match first_total.cmp(&second_total) {
        Ordering::Greater => Leader::First,
        Ordering::Less => Leader::Second,
        Ordering::Equal => Leader::Tie,
    };
    Comparison {
        first_total,
        second_total,
        leader,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_store;

    #[test]
    fn test_get_entity_name_known_ids() {
        let store = fixture_store();
        assert_eq!(get_entity_name(&store, Category::Drivers, "d1").unwrap(), "Sam Bird");
        assert_eq!(get_entity_name(&store, Category::Teams, "t4").unwrap(), "DS Techeetah");
    }

    #[test]
    fn test_get_entity_name_unknown_id_is_not_found() {
        let store = fixture_store();
        assert_eq!(
            get_entity_name(&store, Category::Drivers, "d99"),
            Err(StoreError::NotFound("drivers/d99".to_string()))
        );
        // A team id is not a driver id.
        assert!(get_entity_name(&store, Category::Drivers, "t1").is_err());
    }

    #[test]
    fn test_get_entity_name_for_every_stored_entity() {
        let store = fixture_store();
        for (id, driver) in &store.drivers {
            assert_eq!(get_entity_name(&store, Category::Drivers, id).unwrap(), driver.name);
        }
        for (id, team) in &store.teams {
            assert_eq!(get_entity_name(&store, Category::Teams, id).unwrap(), team.name);
        }
    }

    #[test]
    fn test_get_entity_profile_driver() {
        let store = fixture_store();
        match get_entity_profile(&store, Category::Drivers, "d3").unwrap() {
            Entity::Driver(driver) => {
                assert_eq!(driver.name, "Sebastien Buemi");
                assert_eq!(driver.nationality, "Swiss");
                assert_eq!(driver.team_id, "t3");
            }
            other => panic!("expected a driver, got {other:?}"),
        }
    }

    #[test]
    fn test_get_entity_profile_team_and_miss() {
        let store = fixture_store();
        let entity = get_entity_profile(&store, Category::Teams, "t2").unwrap();
        assert_eq!(entity, Entity::Team(&store.teams["t2"]));
        assert!(matches!(
            get_entity_profile(&store, Category::Teams, "d2"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_find_entity_id_by_name_ignores_case() {
        let store = fixture_store();
        assert_eq!(
            find_entity_id_by_name(&store, Category::Drivers, "Jean-Eric Vergne"),
            Some("d4")
        );
        assert_eq!(
            find_entity_id_by_name(&store, Category::Drivers, "jean-eric vergne"),
            Some("d4")
        );
        assert_eq!(
            find_entity_id_by_name(&store, Category::Drivers, "ANTÓNIO FÉLIX DA COSTA"),
            Some("d5")
        );
        assert_eq!(
            find_entity_id_by_name(&store, Category::Teams, "nissan E.DAMS"),
            Some("t3")
        );
    }

    #[test]
    fn test_find_entity_id_by_name_is_exact() {
        let store = fixture_store();
        assert_eq!(find_entity_id_by_name(&store, Category::Drivers, "Unknown Driver"), None);
        assert_eq!(find_entity_id_by_name(&store, Category::Drivers, "Sam"), None);
        assert_eq!(find_entity_id_by_name(&store, Category::Drivers, ""), None);
        // Driver names are not searched when looking up teams.
        assert_eq!(find_entity_id_by_name(&store, Category::Teams, "Sam Bird"), None);
    }

    #[test]
    fn test_find_entity_id_by_name_returns_first_in_stored_order() {
        let json = r#"{
            "drivers": {
                "x2": { "name": "Same Name", "nationality": "A", "team_id": "t" },
                "x1": { "name": "same name", "nationality": "B", "team_id": "t" }
            },
            "teams": {}, "seasons": {}
        }"#;
        let store = DataStore::from_json_str(json).unwrap();
        assert_eq!(find_entity_id_by_name(&store, Category::Drivers, "SAME NAME"), Some("x2"));
    }

    #[test]
    fn test_get_season() {
        let store = fixture_store();
        let season = get_season(&store, "2019-2020").unwrap();
        assert_eq!(season.season_name, "2019-2020");
        assert!(get_season(&store, "2030-2031").is_none());
        assert!(get_season(&store, "").is_none());
    }

    #[test]
    fn test_get_standings_keeps_stored_order() {
        let store = fixture_store();
        let drivers = get_standings(&store, "2019-2020", StandingsKind::Drivers).unwrap();
        assert_eq!(drivers.len(), 4);
        let ids: Vec<&str> = drivers.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, ["d1", "d4", "d3", "d2"]);

        let teams = get_standings(&store, "2020-2021", StandingsKind::Teams).unwrap();
        assert_eq!(teams.len(), 3);
        assert_eq!(teams[0].entity_id, "t4");
        assert_eq!(teams[0].points, 85);
    }

    #[test]
    fn test_get_standings_unknown_season() {
        let store = fixture_store();
        assert!(get_standings(&store, "1999-2000", StandingsKind::Drivers).is_none());
        assert!(get_standings(&store, "1999-2000", StandingsKind::Teams).is_none());
    }

    #[test]
    fn test_get_races_and_race() {
        let store = fixture_store();
        let races = get_races(&store, "2019-2020").unwrap();
        assert!(races.contains_key("Diriyah E-Prix"));
        assert_eq!(races.len(), 3);

        let race = get_race(&store, "2019-2020", "Mexico City E-Prix").unwrap();
        assert_eq!(race.location, "Mexico City, Mexico");
        assert_eq!(race.results[0].driver_id, "d3");
    }

    #[test]
    fn test_get_race_misses() {
        let store = fixture_store();
        assert!(get_races(&store, "nope").is_none());
        assert!(get_race(&store, "nope", "Mexico City E-Prix").is_none());
        assert!(get_race(&store, "2020-2021", "Mexico City E-Prix").is_none());
        // Race names are matched exactly.
        assert!(get_race(&store, "2019-2020", "mexico city e-prix").is_none());
    }

    #[test]
    fn test_search_races_single_match() {
        let store = fixture_store();
        let hits: Vec<RaceMatch> = search_races(&store, "Mexico").collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].race_name, "Mexico City E-Prix");
        assert_eq!(hits[0].season, "2019-2020");
        assert_eq!(hits[0].date, "2020-02-15");
    }

    #[test]
    fn test_search_races_is_case_insensitive_and_partial() {
        let store = fixture_store();
        let hits: Vec<(&str, &str)> = search_races(&store, "rIYAd")
            .map(|hit| (hit.season, hit.race_name))
            .collect();
        assert_eq!(
            hits,
            [("2019-2020", "Diriyah E-Prix"), ("2020-2021", "Diriyah E-Prix")]
        );
    }

    #[test]
    fn test_search_races_follows_season_then_race_order() {
        let store = fixture_store();
        let names: Vec<&str> = search_races(&store, ", ").map(|hit| hit.race_name).collect();
        assert_eq!(
            names,
            [
                "Diriyah E-Prix",
                "Santiago E-Prix",
                "Mexico City E-Prix",
                "Diriyah E-Prix",
                "Rome E-Prix",
                "London E-Prix",
            ]
        );
    }

    #[test]
    fn test_search_races_no_match_is_empty() {
        let store = fixture_store();
        assert_eq!(search_races(&store, "Monaco").count(), 0);
    }

    #[test]
    fn test_search_races_is_lazy() {
        let store = fixture_store();
        let first = search_races(&store, "").next().unwrap();
        assert_eq!(first.race_name, "Diriyah E-Prix");
        assert_eq!(first.season, "2019-2020");
    }

    #[test]
    fn test_calculate_total_points_is_additive() {
        let store = fixture_store();
        assert_eq!(calculate_total_points(&store, "d1"), 120);
        assert_eq!(calculate_total_points(&store, "d4"), 70);
        assert_eq!(calculate_total_points(&store, "d5"), 60);
    }

    #[test]
    fn test_calculate_total_points_without_appearances_is_zero() {
        let store = fixture_store();
        assert_eq!(calculate_total_points(&store, "d6"), 0);
        assert_eq!(calculate_total_points(&store, "no-such-driver"), 0);
        // Team rankings do not count towards drivers.
        assert_eq!(calculate_total_points(&store, "t4"), 0);
    }

    #[test]
    fn test_compare_drivers() {
        let store = fixture_store();
        let cmp = compare_drivers(&store, "d1", "d4");
        assert_eq!(cmp.first_total, 120);
        assert_eq!(cmp.second_total, 70);
        assert_eq!(cmp.leader, Leader::First);

        assert_eq!(compare_drivers(&store, "d6", "d2").leader, Leader::Second);
        assert_eq!(compare_drivers(&store, "d3", "d3").leader, Leader::Tie);
    }
}
