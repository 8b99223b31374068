//! # lead-auth
//!
//! Admin authentication for leaddesk.
//!
//! A login with the configured email and password yields an `admin_auth`
//! cookie. Every protected `/admin` request must carry a cookie that verifies
//! against the configured session mode, otherwise it is redirected to the
//! login page.

pub mod cookie;
pub mod credentials;
pub mod error;
pub mod gate;
pub mod session;

use chrono::{DateTime, Utc};
use lead_config::AdminConfig;

pub use cookie::COOKIE_NAME;
pub use error::AuthError;
pub use gate::{GateDecision, LOGIN_PATH};
pub use session::{SessionClaims, SessionManager};

/// Credential check, session issue and the gate, for one admin account.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    config: AdminConfig,
    sessions: SessionManager,
}

impl AdminAuth {
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let sessions = SessionManager::from_config(&config);
        Self { config, sessions }
    }

    #[must_use]
    pub const fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Check credentials and build the `Set-Cookie` value for a new session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on mismatch, or
    /// `AuthError::Signing` if a signed token cannot be produced.
    pub fn login(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        credentials::verify_credentials(&self.config, email, password)?;
        let token = self.sessions.issue(now)?;
        Ok(cookie::session_cookie(
            &token,
            self.config.cookie_max_age_secs,
            self.config.secure_cookie,
        ))
    }

    /// `Set-Cookie` value ending the session.
    #[must_use]
    pub fn logout_cookie(&self) -> String {
        cookie::clear_cookie(self.config.secure_cookie)
    }

    /// Verify the session carried in a request's `Cookie` headers.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingSession` without a cookie, otherwise the
    /// verification error.
    pub fn authenticate<'a>(
        &self,
        cookie_headers: impl IntoIterator<Item = &'a str>,
        now: DateTime<Utc>,
    ) -> Result<Option<SessionClaims>, AuthError> {
        let token = cookie::session_token(cookie_headers).ok_or(AuthError::MissingSession)?;
        self.sessions.verify(&token, now)
    }

    /// Decide whether a request to `path` may proceed.
    pub fn gate<'a>(
        &self,
        path: &str,
        cookie_headers: impl IntoIterator<Item = &'a str>,
        now: DateTime<Utc>,
    ) -> GateDecision {
        if !gate::is_protected(path) {
            return GateDecision::Allow;
        }
        match self.authenticate(cookie_headers, now) {
            Ok(_) => GateDecision::Allow,
            Err(error) => {
                tracing::debug!(path, %error, "admin gate redirecting to login");
                GateDecision::RedirectToLogin
            }
        }
    }
}
