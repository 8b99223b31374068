//! Submission API: save and list per category, plus the status endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
};
use chrono::Utc;
use lead_config::ValidationMode;
use lead_core::enums::Category;
use lead_core::errors::CoreError;
use lead_core::responses::{SaveResponse, StatusUpdateRequest};
use lead_core::submission::Submission;
use lead_schema::{SchemaError, registry::STATUS_UPDATE_REQUEST};
use serde_json::Value;

use crate::body::{parse_checked, parse_json, schema_rejection};
use crate::error::ApiError;
use crate::handlers::cookie_headers;
use crate::state::SharedState;

pub async fn save_general(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<SaveResponse>, ApiError> {
    save(&state, Category::General, &body).await
}

pub async fn save_contact(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<SaveResponse>, ApiError> {
    save(&state, Category::Contact, &body).await
}

pub async fn list_general(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Submission>>, ApiError> {
    list(&state, Category::General).await
}

pub async fn list_contact(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Submission>>, ApiError> {
    list(&state, Category::Contact).await
}

async fn save(
    state: &SharedState,
    category: Category,
    body: &Bytes,
) -> Result<Json<SaveResponse>, ApiError> {
    let value = parse_json(body)?;
    check_submission(state, category, &value)?;

    let Value::Object(fields) = value else {
        return Err(ApiError::bad_request("Submission must be a JSON object"));
    };

    let record = Submission::from_payload(fields, Utc::now(), state.id_entropy()).map_err(
        |e| match e {
            CoreError::Validation(msg) => ApiError::BadRequest {
                message: "Invalid submission".into(),
                errors: vec![msg],
            },
            other => ApiError::Internal(other.to_string()),
        },
    )?;
    let id = record.id.clone();

    state
        .stores
        .get(category)
        .append(record)
        .await
        .map_err(ApiError::from_write)?;

    tracing::info!(%category, %id, "submission saved");
    Ok(Json(SaveResponse { success: true, id }))
}

/// Apply the configured validation mode to a submission body.
fn check_submission(state: &SharedState, category: Category, value: &Value) -> Result<(), ApiError> {
    if !value.is_object() {
        return Err(ApiError::bad_request("Submission must be a JSON object"));
    }

    match state.config.validation.mode {
        ValidationMode::Off => Ok(()),
        ValidationMode::Enforce => state
            .schemas
            .validate_submission(category, value)
            .map_err(|e| match e {
                SchemaError::ValidationFailed { errors } => ApiError::BadRequest {
                    message: "Invalid submission".into(),
                    errors,
                },
                other => schema_rejection(other),
            }),
        ValidationMode::Warn => {
            if let Err(SchemaError::ValidationFailed { errors }) =
                state.schemas.validate_submission(category, value)
            {
                tracing::warn!(%category, ?errors, "storing submission that fails validation");
            }
            Ok(())
        }
    }
}

async fn list(state: &SharedState, category: Category) -> Result<Json<Vec<Submission>>, ApiError> {
    let records = state
        .stores
        .get(category)
        .read_all()
        .await
        .map_err(ApiError::ReadFailed)?;
    tracing::debug!(%category, count = records.len(), "submissions listed");
    Ok(Json(records))
}

/// `PATCH /api/submissions/:category/:id/status`, admin only.
pub async fn update_status(
    State(state): State<SharedState>,
    Path((category, id)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Submission>, ApiError> {
    state
        .auth
        .authenticate(cookie_headers(&headers), Utc::now())
        .map_err(|_| ApiError::Unauthorized)?;

    let category: Category = category
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Unknown category '{category}'")))?;
    let request: StatusUpdateRequest = parse_checked(&state.schemas, STATUS_UPDATE_REQUEST, &body)?;

    let updated = state
        .stores
        .get(category)
        .update_status(&id, request.status)
        .await
        .map_err(ApiError::from_write)?;
    Ok(Json(updated))
}
