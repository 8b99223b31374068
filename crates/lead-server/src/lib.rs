//! # lead-server
//!
//! axum HTTP server for leaddesk.
//!
//! Routes:
//! - `GET|POST /api/submissions/save`: popup form submissions
//! - `GET|POST /api/submissions/contact/save`: contact page submissions
//! - `PATCH /api/submissions/:category/:id/status`: admin status change
//! - `POST /api/admin/login`, `POST /api/admin/logout`
//! - `GET /admin/login`, `GET /admin`: server-rendered admin pages
//! - `GET /healthz`
//!
//! Every `/admin` path except the login page passes through the admin gate.

mod body;
pub mod error;
mod handlers;
mod middleware;
pub mod pages;
pub mod state;

use std::time::Duration;

use anyhow::Context;
use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};
use lead_config::LeadConfig;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub use error::ApiError;
pub use state::{AppState, SharedState};

/// Build the application router.
pub fn router(state: SharedState) -> Router {
    let mut app = Router::new()
        .route(
            "/api/submissions/save",
            get(handlers::submissions::list_general).post(handlers::submissions::save_general),
        )
        .route(
            "/api/submissions/contact/save",
            get(handlers::submissions::list_contact).post(handlers::submissions::save_contact),
        )
        .route(
            "/api/submissions/:category/:id/status",
            patch(handlers::submissions::update_status),
        )
        .route("/api/admin/login", post(handlers::admin::login))
        .route("/api/admin/logout", post(handlers::admin::logout))
        .route("/admin/login", get(handlers::admin::login_page))
        .route("/admin", get(handlers::admin::dashboard_page))
        .route("/admin/", get(handlers::admin::dashboard_page))
        .route("/healthz", get(handlers::healthz))
        .fallback(handlers::not_found)
        .layer(from_fn_with_state(
            state.clone(),
            middleware::admin_gate_middleware,
        ));

    if let Some(cors) = cors_layer(&state.config.server.cors_origins) {
        app = app.layer(cors);
    }

    app.layer(from_fn_with_state(
        state.clone(),
        middleware::request_tracing_middleware,
    ))
    .with_state(state)
}

/// CORS for configured origins; `None` keeps the API same-origin.
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::OPTIONS,
            ])
            .allow_headers([CONTENT_TYPE])
            .max_age(Duration::from_secs(60 * 60)),
    )
}

/// Serve `state` on an already-bound listener until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve(listener: TcpListener, state: SharedState) -> std::io::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Open the stores, bind the configured address and serve.
///
/// # Errors
///
/// Returns an error if the stores cannot be opened, the address cannot be
/// bound, or the server fails.
pub async fn run(config: LeadConfig) -> anyhow::Result<()> {
    let address = config.server.bind_address();
    let state = AppState::open(config)
        .await
        .context("failed to open submission stores")?;

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(%address, backend = ?state.stores.backend(), "leaddesk server listening");

    serve(listener, state).await.context("server error")?;
    tracing::info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
