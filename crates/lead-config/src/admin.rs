//! Admin login and session cookie configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "change-me";
pub const DEFAULT_ADMIN_AUTH_TOKEN: &str = "change-me-admin-token";

/// What the `admin_auth` cookie carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// The cookie holds `auth_token` itself.
    #[default]
    Static,
    /// The cookie holds an expiring token signed with `auth_token`.
    Signed,
}

fn default_email() -> String {
    DEFAULT_ADMIN_EMAIL.to_string()
}

fn default_password() -> String {
    DEFAULT_ADMIN_PASSWORD.to_string()
}

fn default_auth_token() -> String {
    DEFAULT_ADMIN_AUTH_TOKEN.to_string()
}

/// Seven days.
const fn default_cookie_max_age_secs() -> u64 {
    60 * 60 * 24 * 7
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminConfig {
    #[serde(default = "default_email")]
    pub email: String,

    #[serde(default = "default_password")]
    pub password: String,

    /// Shared secret: the cookie value in static mode, the signing key in
    /// signed mode.
    #[serde(default = "default_auth_token")]
    pub auth_token: String,

    #[serde(default)]
    pub session_mode: SessionMode,

    #[serde(default = "default_cookie_max_age_secs")]
    pub cookie_max_age_secs: u64,

    /// Add `Secure` to the cookie. Enable behind HTTPS.
    #[serde(default)]
    pub secure_cookie: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: default_email(),
            password: default_password(),
            auth_token: default_auth_token(),
            session_mode: SessionMode::default(),
            cookie_max_age_secs: default_cookie_max_age_secs(),
            secure_cookie: false,
        }
    }
}

impl AdminConfig {
    /// Names of fields still holding their built-in fallback.
    #[must_use]
    pub fn fields_using_defaults(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.email == DEFAULT_ADMIN_EMAIL {
            fields.push("email");
        }
        if self.password == DEFAULT_ADMIN_PASSWORD {
            fields.push("password");
        }
        if self.auth_token == DEFAULT_ADMIN_AUTH_TOKEN {
            fields.push("auth_token");
        }
        fields
    }
}
