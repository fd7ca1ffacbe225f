use std::path::PathBuf;
use thiserror::Error;

use crate::types::CatalogNumber;

/// Failure to resolve a single satellite record
#[derive(Error, Debug)]
pub enum SatDataError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("satellite {0} not found")]
    NotFound(CatalogNumber),

    #[error("{}: missing [{group}] group", .path.display())]
    MissingGroup { path: PathBuf, group: String },

    #[error("{}: missing {key} key", .path.display())]
    MissingKey { path: PathBuf, key: String },

    #[error("invalid TLE for satellite {catalog_number}: {reason}")]
    InvalidTle {
        catalog_number: CatalogNumber,
        reason: String,
    },

    #[error("TLE in record {requested} belongs to satellite {found}")]
    CatalogMismatch {
        requested: CatalogNumber,
        found: u64,
    },

    #[error("cannot derive a catalog number from {name:?}")]
    InvalidFileName { name: String },
}

/// Failure to read a category file. The whole category is skipped.
#[derive(Error, Debug)]
pub enum CategoryError {
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: no category name", .0.display())]
    Empty(PathBuf),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectorError {
    #[error("category index {index} out of range ({count} categories)")]
    CategoryOutOfRange { index: usize, count: usize },
}
