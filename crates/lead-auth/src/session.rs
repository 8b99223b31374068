//! Admin session tokens carried in the `admin_auth` cookie.
//!
//! In static mode the token is the configured shared secret. In signed mode
//! it is `v1.<payload>.<signature>`: base64url JSON claims followed by a
//! base64url HMAC-SHA256 of the payload part, keyed by the same secret.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use lead_config::{AdminConfig, SessionMode};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::credentials::constant_time_eq;
use crate::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_VERSION_V1: &str = "v1";
const MAX_TOKEN_LEN: usize = 1024;

/// Claims inside a signed session token. Times are unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Admin email the session was issued to.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    /// Random hex so two logins in the same second get distinct tokens.
    pub nonce: String,
}

/// Issues and verifies session tokens for one admin configuration.
#[derive(Debug, Clone)]
pub struct SessionManager {
    mode: SessionMode,
    secret: String,
    subject: String,
    max_age_secs: u64,
}

impl SessionManager {
    #[must_use]
    pub fn from_config(config: &AdminConfig) -> Self {
        Self {
            mode: config.session_mode,
            secret: config.auth_token.clone(),
            subject: config.email.clone(),
            max_age_secs: config.cookie_max_age_secs,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> SessionMode {
        self.mode
    }

    #[must_use]
    pub const fn max_age_secs(&self) -> u64 {
        self.max_age_secs
    }

    /// Produce the cookie value for a freshly logged-in admin.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Signing` if the nonce or signature cannot be
    /// produced.
    pub fn issue(&self, now: DateTime<Utc>) -> Result<String, AuthError> {
        match self.mode {
            SessionMode::Static => Ok(self.secret.clone()),
            SessionMode::Signed => {
                let mut nonce_bytes = [0u8; 8];
                getrandom::fill(&mut nonce_bytes)
                    .map_err(|e| AuthError::Signing(format!("failed to generate nonce: {e}")))?;

                let iat = now.timestamp();
                let lifetime = i64::try_from(self.max_age_secs).unwrap_or(i64::MAX);
                let claims = SessionClaims {
                    sub: self.subject.clone(),
                    iat,
                    exp: iat.saturating_add(lifetime),
                    nonce: nonce_bytes.iter().map(|b| format!("{b:02x}")).collect(),
                };
                self.sign(&claims)
            }
        }
    }

    /// Check a cookie value. Returns the claims for signed tokens and `None`
    /// for a valid static token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidSession` for a wrong or malformed token and
    /// `AuthError::SessionExpired` for a signed token past its `exp`.
    pub fn verify(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<SessionClaims>, AuthError> {
        match self.mode {
            SessionMode::Static => {
                if constant_time_eq(token.as_bytes(), self.secret.as_bytes()) {
                    Ok(None)
                } else {
                    Err(AuthError::InvalidSession("token mismatch".into()))
                }
            }
            SessionMode::Signed => self.verify_signed(token, now).map(Some),
        }
    }

    fn sign(&self, claims: &SessionClaims) -> Result<String, AuthError> {
        let payload = serde_json::to_vec(claims)
            .map_err(|e| AuthError::Signing(format!("failed to encode claims: {e}")))?;
        let payload_part = URL_SAFE_NO_PAD.encode(payload);

        let mut mac = self.mac()?;
        mac.update(payload_part.as_bytes());
        let sig_part = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{TOKEN_VERSION_V1}.{payload_part}.{sig_part}"))
    }

    fn verify_signed(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, AuthError> {
        if token.len() > MAX_TOKEN_LEN {
            return Err(AuthError::InvalidSession("token too long".into()));
        }

        let mut parts = token.split('.');
        let (Some(version), Some(payload_part), Some(sig_part), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::InvalidSession("expected three parts".into()));
        };
        if version != TOKEN_VERSION_V1 {
            return Err(AuthError::InvalidSession(format!(
                "unsupported version '{version}'"
            )));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(sig_part)
            .map_err(|e| AuthError::InvalidSession(format!("bad signature encoding: {e}")))?;
        let mut mac = self.mac()?;
        mac.update(payload_part.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::InvalidSession("signature mismatch".into()))?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_part)
            .map_err(|e| AuthError::InvalidSession(format!("bad payload encoding: {e}")))?;
        let claims: SessionClaims = serde_json::from_slice(&payload)
            .map_err(|e| AuthError::InvalidSession(format!("bad claims: {e}")))?;

        if claims.sub != self.subject {
            return Err(AuthError::InvalidSession("issued to another admin".into()));
        }
        if claims.exp <= now.timestamp() {
            return Err(AuthError::SessionExpired);
        }
        Ok(claims)
    }

    fn mac(&self) -> Result<HmacSha256, AuthError> {
        HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| AuthError::Signing(e.to_string()))
    }
}
