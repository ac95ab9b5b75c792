//! Errors returned by the record store.
//!
//! Every variant is recoverable: the dispatcher prints the message and carries on.

use std::path::PathBuf;

use thiserror::Error;

/// A field value or id that cannot be accepted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Student ID cannot be empty.")]
    EmptyId,
    #[error("Student with ID '{0}' already exists. Please use a unique ID.")]
    DuplicateId(String),
    #[error("Year must be a positive number (got {0}).")]
    InvalidYear(i64),
    #[error("Marks must be between 0 and 100 (got {0}).")]
    MarksOutOfRange(f64),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Student with ID '{0}' not found.")]
    NotFound(String),

    /// Reading or writing the backing file failed
    #[error("Error {action} {}: {source}", .path.display())]
    Persistence {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON array of records
    #[error("Error decoding JSON from {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn reading(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Persistence {
            action: "reading",
            path: path.into(),
            source,
        }
    }

    pub(crate) fn writing(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Persistence {
            action: "saving data to",
            path: path.into(),
            source,
        }
    }
}
