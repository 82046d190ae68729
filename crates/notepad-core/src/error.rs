//! Error types for notepad-core

use thiserror::Error;

/// Result type alias using notepad-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notepad-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// `SQLite` error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Note not found
    #[error("Note not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A blocking storage task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The note store has been closed
    #[error("Note store is closed")]
    Closed,
}

impl Error {
    /// Whether this error came from the storage layer rather than the caller.
    ///
    /// Storage failures are reported as a generic "operation failed" and leave
    /// state unchanged; the user action can simply be retried.
    pub const fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Sqlite(_) | Self::Io(_) | Self::Serialization(_) | Self::Task(_)
        )
    }
}
