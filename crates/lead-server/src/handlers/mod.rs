pub mod admin;
pub mod submissions;

use axum::{
    Json,
    http::{HeaderMap, header::COOKIE},
};
use lead_core::responses::HealthResponse;

use crate::error::ApiError;

/// Every `Cookie` header value that is valid UTF-8.
pub(crate) fn cookie_headers(headers: &HeaderMap) -> impl Iterator<Item = &str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
}

pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".into())
}
