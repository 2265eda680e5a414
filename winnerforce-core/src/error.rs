//! Error types for Winnerforce.

use thiserror::Error;

/// A `DateLike` value that could not be turned into an instant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Could not parse date '{input}': {reason}")]
pub struct DateParseError {
    pub input: String,
    pub reason: String,
}

impl DateParseError {
    pub fn new(input: impl Into<String>, reason: impl Into<String>) -> Self {
        DateParseError {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur in Winnerforce operations.
#[derive(Error, Debug)]
pub enum WinnerforceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error(transparent)]
    DateParse(#[from] DateParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for Winnerforce operations.
pub type WinnerforceResult<T> = Result<T, WinnerforceError>;
