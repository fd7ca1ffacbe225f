//! Satellite picker core.
//!
//! Loads satellite records and category lists from a data directory and
//! exposes them through [`SatSelector`]: pick a category, highlight a row,
//! activate it and get notified with its catalog number.

pub mod error;
pub mod module;
pub mod types;

pub use error::{CategoryError, SatDataError, SelectorError};
pub use module::satdata::{CatalogLoader, FsSatStore, LoadReport, SatDataStore};
pub use module::selector::{DisplaySurface, ListView, SatSelector, SubscriptionId};
pub use types::{ALL_SATELLITES, CatalogNumber, CategoryTable, Column, ColumnFlags, SatelliteRecord};
