//! Store error types for lead-store.

use std::path::PathBuf;

use lead_core::enums::{Category, SubmissionStatus};
use thiserror::Error;

/// Errors from submission store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or renaming a backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a JSON array of submissions.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be serialized.
    #[error("Failed to encode submissions: {0}")]
    Encode(#[from] serde_json::Error),

    /// A record with this id already exists in the category.
    #[error("Submission {id} already exists in {category}")]
    DuplicateId { category: Category, id: String },

    /// No record with this id exists in the category.
    #[error("Submission {id} not found in {category}")]
    NotFound { category: Category, id: String },

    /// The status change is not allowed by the state machine.
    #[error("Cannot move submission {id} from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: SubmissionStatus,
        to: SubmissionStatus,
    },

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Invalid row encountered in the database.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
