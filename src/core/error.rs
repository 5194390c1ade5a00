use std::fmt;

/// Errors raised by the data store and keyed entity lookups.
///
/// Missing seasons, races, or search hits are not errors. Those come back
/// as `None` or an empty iterator from the query layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The dataset file, an entity category, or a keyed entity does not exist.
    NotFound(String),
    /// The dataset could not be decoded into the expected structure. Fatal at load.
    Malformed(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(msg) => write!(f, "not found: {msg}"),
            StoreError::Malformed(msg) => write!(f, "malformed data: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}
