//! # lead-client
//!
//! HTTP client for a running leaddesk server.
//!
//! Covers the public Submission API (`save`, `list`) used by forms and the
//! admin calls (`login`, `update_status`, `logout`) used by the terminal
//! dashboard. The admin session cookie returned by `login` is kept on the
//! client and replayed on later admin calls.

mod error;
mod http;

pub use error::ClientError;

use std::time::Duration;

use lead_core::enums::{Category, SubmissionStatus};
use lead_core::responses::{LoginRequest, LoginResponse, SaveResponse, StatusUpdateRequest};
use lead_core::submission::Submission;
use reqwest::header::{COOKIE, SET_COOKIE};

use crate::http::{check_response, cookie_pair};

const SESSION_COOKIE: &str = "admin_auth";

/// HTTP client for one leaddesk server.
pub struct LeadClient {
    http: reqwest::Client,
    base_url: reqwest::Url,
    session: Option<String>,
}

impl LeadClient {
    /// Create a client for the server at `base_url` (e.g. `http://127.0.0.1:3000`).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUrl` for an unparsable URL and
    /// `ClientError::Http` if the underlying client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = reqwest::Url::parse(base_url).map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("leaddesk/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url,
            session: None,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    fn url(&self, path: &str) -> Result<reqwest::Url, ClientError> {
        self.base_url.join(path).map_err(|e| ClientError::InvalidUrl {
            url: format!("{}{path}", self.base_url),
            reason: e.to_string(),
        })
    }

    /// Post a record to its category's list. Returns the stored id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] carrying validation messages when the
    /// server rejects the body, or a transport error.
    pub async fn save(
        &self,
        category: Category,
        record: &Submission,
    ) -> Result<SaveResponse, ClientError> {
        let url = self.url(category.save_path())?;
        let resp = check_response(self.http.post(url).json(record).send().await?).await?;
        let saved: SaveResponse = resp.json().await?;
        tracing::debug!(%category, id = %saved.id, "submission saved");
        Ok(saved)
    }

    /// Fetch a category's full list, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the body is not a
    /// list of submissions.
    pub async fn list(&self, category: Category) -> Result<Vec<Submission>, ClientError> {
        let url = self.url(category.save_path())?;
        let resp = check_response(self.http.get(url).send().await?).await?;
        Ok(resp.json().await?)
    }

    /// Log in as the admin and keep the session cookie.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unauthorized`] for wrong credentials and
    /// [`ClientError::MissingCookie`] if the server set no session.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let url = self.url("/api/admin/login")?;
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp = check_response(self.http.post(url).json(&body).send().await?).await?;

        let session = resp
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|v| cookie_pair(v, SESSION_COOKIE))
            .map(str::to_string)
            .ok_or(ClientError::MissingCookie)?;

        let parsed: LoginResponse = resp.json().await?;
        if !parsed.success {
            return Err(ClientError::Unauthorized("login refused".into()));
        }

        self.session = Some(session);
        tracing::debug!(base_url = %self.base_url, "admin session established");
        Ok(())
    }

    /// End the admin session on the server and forget the cookie.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        let url = self.url("/api/admin/logout")?;
        check_response(self.http.post(url).header(COOKIE, session).send().await?).await?;
        Ok(())
    }

    /// Move one record to a new status. Requires [`Self::login`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotLoggedIn`] without a session,
    /// [`ClientError::Api`] for unknown ids (404) and disallowed transitions
    /// (409).
    pub async fn update_status(
        &self,
        category: Category,
        id: &str,
        status: SubmissionStatus,
    ) -> Result<Submission, ClientError> {
        let session = self.session.as_deref().ok_or(ClientError::NotLoggedIn)?;
        let url = self.url(&format!(
            "/api/submissions/{}/{}/status",
            category.as_str(),
            urlencoding::encode(id)
        ))?;
        let resp = check_response(
            self.http
                .patch(url)
                .header(COOKIE, session)
                .json(&StatusUpdateRequest { status })
                .send()
                .await?,
        )
        .await?;
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rejects_unparsable_base_url() {
        assert!(matches!(
            LeadClient::new("not a url"),
            Err(ClientError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn joins_paths_onto_base() {
        let client = LeadClient::new("http://127.0.0.1:3000").unwrap();
        assert_eq!(
            client.url(Category::Contact.save_path()).unwrap().as_str(),
            "http://127.0.0.1:3000/api/submissions/contact/save"
        );
        assert!(!client.is_logged_in());
    }

    #[tokio::test]
    async fn update_status_requires_login() {
        let client = LeadClient::new("http://127.0.0.1:9").unwrap();
        let result = client
            .update_status(Category::General, "sub-1", SubmissionStatus::Closed)
            .await;
        assert!(matches!(result, Err(ClientError::NotLoggedIn)));
    }
}
