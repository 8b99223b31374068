//! Shared HTTP response helpers.
//!
//! Failed responses carry an `ErrorResponse` JSON body; its message and
//! validation errors are lifted into [`ClientError`].

use lead_core::responses::ErrorResponse;

use crate::error::ClientError;

/// Check an HTTP response for error statuses.
///
/// Returns the response unchanged on success. Handles:
/// - **401 Unauthorized** → [`ClientError::Unauthorized`]
/// - **Non-success status** → [`ClientError::Api`] with the server's
///   message, or the raw body when it is not an `ErrorResponse`.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let (message, errors) = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) => (parsed.error, parsed.errors),
        Err(_) => (body, Vec::new()),
    };

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized(message));
    }
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
        errors,
    })
}

/// The `name=value` pair of a `Set-Cookie` header, if it sets `name`.
pub fn cookie_pair<'a>(set_cookie: &'a str, name: &str) -> Option<&'a str> {
    let pair = set_cookie.split(';').next()?.trim();
    let (key, _) = pair.split_once('=')?;
    (key == name).then_some(pair)
}
