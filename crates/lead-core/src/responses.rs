//! Request and response bodies of the HTTP API.
//!
//! Shared by the server handlers and the reqwest client so both sides agree
//! on the JSON shape.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SubmissionStatus;

/// Response from `POST /api/submissions/save` and `/api/submissions/contact/save`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SaveResponse {
    pub success: bool,
    pub id: String,
}

/// Error body returned by every endpoint on failure.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    /// Individual validation messages, when the body failed schema checks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_errors(error: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            errors,
        }
    }
}

/// Body of `POST /api/admin/login`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response from `POST /api/admin/login` and `/api/admin/logout`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LoginResponse {
    pub success: bool,
}

/// Body of `PATCH /api/submissions/{category}/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusUpdateRequest {
    pub status: SubmissionStatus,
}

/// Response from `GET /healthz`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}
