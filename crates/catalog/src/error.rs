//! Error types for the catalog store

use bookshelf_core::{BookId, RecordError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while loading, saving or mutating a catalog
///
/// Outcomes such as "already exists" or "not found" are not errors; they are
/// reported through [`crate::AddOutcome`] and [`crate::ChangeOutcome`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Invalid input for a record (blank field, unknown search field)
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Every id up to `u64::MAX` is taken, so no new id can be assigned
    #[error("No book id left after {max}")]
    IdSpaceExhausted { max: BookId },

    /// Failed to read the backing file
    #[error("Failed to read catalog file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the backing file
    #[error("Failed to write catalog file at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create the directory holding the backing file
    #[error("Failed to create catalog directory at {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize the catalog
    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Returns true if the error came from bad caller input rather than storage
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Record(_))
    }
}
