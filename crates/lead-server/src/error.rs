//! HTTP-facing error type.
//!
//! Library errors are mapped into [`ApiError`], which renders an
//! `ErrorResponse` body with a fixed public message. Store failures keep
//! their cause for the log only.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lead_core::responses::ErrorResponse;
use lead_store::StoreError;
use thiserror::Error;

pub const SAVE_FAILED: &str = "Failed to save submission";
pub const READ_FAILED: &str = "Failed to retrieve submissions";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not JSON, not an object, or fails the schema.
    #[error("{message}")]
    BadRequest {
        message: String,
        errors: Vec<String>,
    },

    #[error("{0}")]
    NotFound(String),

    /// Duplicate id or disallowed status change.
    #[error("{0}")]
    Conflict(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Failed to save submission")]
    SaveFailed(#[source] StoreError),

    #[error("Failed to retrieve submissions")]
    ReadFailed(#[source] StoreError),

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Map a store error from a write path.
    pub fn from_write(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateId { .. } | StoreError::InvalidTransition { .. } => {
                Self::Conflict(error.to_string())
            }
            StoreError::NotFound { .. } => Self::NotFound(error.to_string()),
            other => Self::SaveFailed(other),
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::SaveFailed(_) | Self::ReadFailed(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::SaveFailed(source) | Self::ReadFailed(source) => {
                tracing::error!(error = %source, "{self}");
            }
            Self::Internal(detail) => tracing::error!(detail, "internal error"),
            _ => tracing::debug!(%status, error = %self, "request rejected"),
        }

        let body = match self {
            Self::BadRequest { message, errors } => ErrorResponse::with_errors(message, errors),
            other => ErrorResponse::new(other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}
