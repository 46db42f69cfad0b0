// src/error.rs

//! Error types for the cookbook service
//!
//! `NotFound`, `Conflict`, and `Validation` are deliberate, expected outcomes
//! that map to specific HTTP status codes. Everything else is an unexpected
//! failure that rolls back the current transaction and degrades to a generic
//! 500 at the API boundary.

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the cookbook service
#[derive(Error, Debug)]
pub enum Error {
    /// A referenced record does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// A uniqueness rule would be violated
    #[error("{0}")]
    Conflict(String),

    /// A request payload failed validation
    #[error("{0}")]
    Validation(String),

    /// Underlying SQLite failure
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// I/O failure (database file, network listener)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else that should not happen
    #[error("internal error: {0}")]
    Internal(String),
}
