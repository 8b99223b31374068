//! Cross-cutting error types for leaddesk.
//!
//! Storage, config, schema and auth errors live in their own crates. The
//! server maps all of them into a single HTTP-facing error.

use thiserror::Error;

/// Errors that can be raised by any leaddesk crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed validation (shape, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A submit was requested while one is already in flight.
    #[error("A submission is already in progress")]
    SubmitInFlight,

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
