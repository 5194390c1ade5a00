//! # Core Application Logic
//!
//! The dataset and everything that can be asked of it.
//! It knows nothing about menus, prompts, or terminals.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • DataStore (records)  │
//!                    │  • query (lookups)      │
//!                    │  • config (settings)    │
//!                    │                         │
//!                    │  Read-only. No UI.      │
//!                    └───────────┬─────────────┘
//!                                │
//!                         ┌──────┴─────┐
//!                         ▼            ▼
//!                  ┌────────────┐ ┌────────────┐
//!                  │  Console   │ │   Tests    │
//!                  │   menu     │ │            │
//!                  └────────────┘ └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`]: typed records and the JSON loader
//! - [`query`]: entity resolution, season/race accessors, search, totals
//! - [`error`]: `StoreError`, the two ways a load or lookup can fail
//! - [`config`]: config file + CLI resolution

pub mod config;
pub mod error;
pub mod query;
pub mod store;

pub use error::StoreError;
pub use store::{Category, DataStore, Entity, StandingsKind};
