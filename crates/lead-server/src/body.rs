//! Request body parsing shared by the handlers.
//!
//! Bodies are read as raw bytes so a missing `Content-Type` or malformed JSON
//! produces the same `ErrorResponse` shape as every other rejection.

use axum::body::Bytes;
use lead_schema::{SchemaError, SchemaRegistry};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Parse raw bytes as JSON.
pub fn parse_json(body: &Bytes) -> Result<Value, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Request body is not valid JSON: {e}")))
}

/// Parse, check against a registered schema, then deserialize.
pub fn parse_checked<T: DeserializeOwned>(
    schemas: &SchemaRegistry,
    schema: &str,
    body: &Bytes,
) -> Result<T, ApiError> {
    let value = parse_json(body)?;
    schemas.validate(schema, &value).map_err(schema_rejection)?;
    serde_json::from_value(value).map_err(|e| ApiError::bad_request(e.to_string()))
}

/// Turn a schema failure into a 400 listing every violation.
pub fn schema_rejection(error: SchemaError) -> ApiError {
    match error {
        SchemaError::ValidationFailed { errors } => ApiError::BadRequest {
            message: "Invalid request body".into(),
            errors,
        },
        other => ApiError::Internal(other.to_string()),
    }
}
