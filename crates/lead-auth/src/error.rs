use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("no admin session cookie")]
    MissingSession,

    #[error("admin session is not valid: {0}")]
    InvalidSession(String),

    #[error("admin session expired")]
    SessionExpired,

    #[error("failed to sign session: {0}")]
    Signing(String),
}
