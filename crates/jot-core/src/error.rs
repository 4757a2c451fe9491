//! Error types for jot-core

use thiserror::Error;

/// Result type alias using jot-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in jot-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The database file cannot be opened or created, or the handle is not ready
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// An insert or delete failed at the storage layer
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// A query failed at the storage layer
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// `SQLite` error outside of a single note operation (bootstrap, migrations)
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored timestamp could not be parsed
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

impl Error {
    pub(crate) fn write(error: impl std::fmt::Display) -> Self {
        Self::WriteFailed(error.to_string())
    }

    pub(crate) fn read(error: impl std::fmt::Display) -> Self {
        Self::ReadFailed(error.to_string())
    }

    pub(crate) fn unavailable(error: impl std::fmt::Display) -> Self {
        Self::StorageUnavailable(error.to_string())
    }
}
