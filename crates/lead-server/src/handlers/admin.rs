//! Admin login, logout and the server-rendered admin pages.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use lead_auth::AuthError;
use lead_core::dashboard::{Dashboard, DashboardFilter};
use lead_core::enums::Category;
use lead_core::responses::{LoginRequest, LoginResponse};
use lead_schema::registry::LOGIN_REQUEST;
use serde::Deserialize;

use crate::body::parse_json;
use crate::error::ApiError;
use crate::pages;
use crate::state::SharedState;

/// `POST /api/admin/login`. Only non-JSON bytes get a 400; any JSON body
/// that does not carry matching credentials is a plain 401.
pub async fn login(State(state): State<SharedState>, body: Bytes) -> Result<Response, ApiError> {
    let value = parse_json(&body)?;
    let request = match state.schemas.validate(LOGIN_REQUEST, &value) {
        Ok(()) => serde_json::from_value::<LoginRequest>(value).ok(),
        Err(error) => {
            tracing::debug!(%error, "login body does not match the login schema");
            None
        }
    };
    let Some(request) = request else {
        tracing::warn!("rejected admin login");
        return Err(ApiError::InvalidCredentials);
    };

    match state.auth.login(&request.email, &request.password, Utc::now()) {
        Ok(cookie) => {
            tracing::info!("admin logged in");
            Ok((
                [(SET_COOKIE, cookie)],
                Json(LoginResponse { success: true }),
            )
                .into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("rejected admin login");
            Err(ApiError::InvalidCredentials)
        }
        Err(other) => Err(ApiError::Internal(other.to_string())),
    }
}

pub async fn logout(State(state): State<SharedState>) -> impl IntoResponse {
    (
        [(SET_COOKIE, state.auth.logout_cookie())],
        Json(LoginResponse { success: true }),
    )
}

pub async fn login_page() -> Html<String> {
    Html(pages::login_page())
}

/// Query string of the dashboard page. Unknown values are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub form: Option<String>,
    pub q: Option<String>,
}

impl DashboardQuery {
    fn to_filter(&self) -> DashboardFilter {
        DashboardFilter {
            category: self.category.as_deref().and_then(|c| c.parse().ok()),
            status: self.status.as_deref().and_then(|s| s.parse().ok()),
            form_type: self.form.as_deref().and_then(|f| f.parse().ok()),
            search: self.q.clone().filter(|q| !q.trim().is_empty()),
        }
    }
}

/// `GET /admin`; reached only through the gate.
pub async fn dashboard_page(
    State(state): State<SharedState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, ApiError> {
    let general = state
        .stores
        .get(Category::General)
        .read_all()
        .await
        .map_err(ApiError::ReadFailed)?;
    let contact = state
        .stores
        .get(Category::Contact)
        .read_all()
        .await
        .map_err(ApiError::ReadFailed)?;

    let filter = query.to_filter();
    let dashboard = Dashboard::build(&general, &contact, &filter);
    Ok(Html(pages::dashboard_page(&dashboard, &filter)))
}
