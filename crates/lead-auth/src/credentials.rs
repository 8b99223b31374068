//! Login credential check.

use lead_config::AdminConfig;

use crate::error::AuthError;

/// Compare two byte strings without short-circuiting on the first mismatch.
///
/// Only the length difference is observable through timing.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Check a login attempt against the configured admin email and password.
///
/// Both fields are always compared so a wrong email and a wrong password take
/// the same path.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if either value differs.
pub fn verify_credentials(
    config: &AdminConfig,
    email: &str,
    password: &str,
) -> Result<(), AuthError> {
    let email_ok = constant_time_eq(email.as_bytes(), config.email.as_bytes());
    let password_ok = constant_time_eq(password.as_bytes(), config.password.as_bytes());

    if email_ok & password_ok {
        Ok(())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}
