//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to a leaddesk server.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The base URL could not be parsed.
    #[error("invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// Validation messages, when the body failed schema checks.
        errors: Vec<String>,
    },

    /// Login was refused or the session cookie was rejected.
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// An admin call was made before logging in.
    #[error("not logged in, call login first")]
    NotLoggedIn,

    /// The server accepted the login but sent no session cookie.
    #[error("login response carried no admin_auth cookie")]
    MissingCookie,
}
