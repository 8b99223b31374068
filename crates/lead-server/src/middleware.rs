use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use lead_auth::{GateDecision, LOGIN_PATH};
use tracing::Instrument;

use crate::handlers::cookie_headers;
use crate::state::SharedState;

const REQUEST_ID_HEADER: &str = "x-request-id";
const MAX_REQUEST_ID_LEN: usize = 128;

/// Wrap each request in an `http.request` span and echo its request id.
pub async fn request_tracing_middleware(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let route = request.uri().path().to_string();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(|| state.next_request_id(), ToString::to_string);

    let span = tracing::info_span!(
        "http.request",
        request_id = %request_id,
        method = %method,
        route = %route,
    );

    let mut response = next.run(request).instrument(span.clone()).await;
    span.in_scope(|| {
        tracing::debug!(status = response.status().as_u16(), "request finished");
    });
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Redirect unauthenticated `/admin` requests to the login page.
pub async fn admin_gate_middleware(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let decision = state.auth.gate(
        request.uri().path(),
        cookie_headers(request.headers()),
        Utc::now(),
    );
    match decision {
        GateDecision::Allow => next.run(request).await,
        GateDecision::RedirectToLogin => Redirect::temporary(LOGIN_PATH).into_response(),
    }
}
