//! Error types for `taskboard`.

use crate::board::{CommandError, ReorderError};

/// Errors that can occur while loading, mutating, or persisting a board.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A `SQLite` database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Neither durable storage nor the seed source produced a usable collection.
    #[error("{0}")]
    Load(String),

    /// A CRUD command was rejected.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// A drag result could not be applied.
    #[error(transparent)]
    Reorder(#[from] ReorderError),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
