//! Common error types for the movie service

use thiserror::Error;

/// Common result type for movie service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the store and the HTTP service
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A movie with the same title and year is already stored
    #[error("Duplicate movie: {title} ({year})")]
    DuplicateMovie { title: String, year: i32 },

    /// JSON encoding/decoding of a stored column failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True when the error is a (title, year) uniqueness conflict
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Error::DuplicateMovie { .. })
    }
}
