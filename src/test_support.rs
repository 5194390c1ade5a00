//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::DataStore;

/// The sample dataset used throughout the unit tests.
pub const FIXTURE_JSON: &str = include_str!("../tests/fixtures/formula_e_data.json");

/// Decodes `FIXTURE_JSON` into a store.
pub fn fixture_store() -> DataStore {
    DataStore::from_json_str(FIXTURE_JSON).expect("fixture dataset decodes")
}

/// Feeds `input` to the menu loop and returns everything it printed.
pub fn run_scripted(store: &DataStore, input: &str) -> String {
    let mut output = Vec::new();
    crate::console::run(store, input.as_bytes(), &mut output).expect("in-memory I/O never fails");
    String::from_utf8(output).expect("reports are UTF-8")
}
