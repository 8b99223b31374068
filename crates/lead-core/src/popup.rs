//! Popup lead form controller.
//!
//! Models the modal form lifecycle without doing any I/O. The caller owns the
//! network request: it calls [`PopupForm::begin_submit`] to get the record to
//! post, then reports the outcome with [`PopupForm::succeed`] or
//! [`PopupForm::fail`].
//!
//! ```text
//! Closed --open--> Editing --begin_submit--> Submitting --succeed--> Succeeded --close--> Closed
//!                     ^                          |
//!                     +----------fail------------+
//! ```
//!
//! While `Submitting`, the submit control is disabled and a second
//! `begin_submit` is rejected.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::enums::{FormType, SubmissionStatus};
use crate::errors::CoreError;
use crate::ids;
use crate::submission::{RESERVED_FIELDS, Submission};

/// How long the success message stays up before the modal closes and the
/// browser navigates to the confirmation page.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Confirmation page for a completed form.
#[must_use]
pub fn confirmation_route(form_type: FormType) -> String {
    format!("/thank-you?type={}", urlencoding::encode(form_type.as_str()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Closed,
    Editing,
    Submitting,
    Succeeded,
}

impl PopupState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Editing => "editing",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
        }
    }
}

impl fmt::Display for PopupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navigation to perform once a submission has been accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub delay: Duration,
    pub location: String,
}

#[derive(Debug, Clone)]
pub struct PopupForm {
    state: PopupState,
    form_type: Option<FormType>,
    fields: Map<String, Value>,
    last_error: Option<String>,
}

impl Default for PopupForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PopupForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: PopupState::Closed,
            form_type: None,
            fields: Map::new(),
            last_error: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> PopupState {
        self.state
    }

    #[must_use]
    pub const fn form_type(&self) -> Option<FormType> {
        self.form_type
    }

    /// Failure message from the last submit attempt, shown in the modal.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Submit is clickable only while editing.
    #[must_use]
    pub fn is_submit_enabled(&self) -> bool {
        self.state == PopupState::Editing
    }

    /// A trigger element was clicked: open the modal bound to `form_type`.
    ///
    /// Opening an already-open modal rebinds it and clears collected fields.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::SubmitInFlight` while a submission is in flight.
    pub fn open(&mut self, form_type: FormType) -> Result<(), CoreError> {
        if self.state == PopupState::Submitting {
            return Err(CoreError::SubmitInFlight);
        }
        self.state = PopupState::Editing;
        self.form_type = Some(form_type);
        self.fields.clear();
        self.last_error = None;
        Ok(())
    }

    /// Record a field value typed into the form.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` unless the modal is editing, or
    /// `CoreError::Validation` for `formType` and the record's own keys.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), CoreError> {
        self.require(PopupState::Editing, "edit")?;
        if name == "formType" || RESERVED_FIELDS.contains(&name) {
            return Err(CoreError::Validation(format!(
                "'{name}' is set by the form, not by the visitor"
            )));
        }
        self.fields
            .insert(name.to_string(), Value::String(value.into()));
        Ok(())
    }

    /// Compose the record to post and move to `Submitting`.
    ///
    /// The id is `sub-<millis>-<4 hex>` built from `now` and `entropy`, so two
    /// visitors submitting in the same millisecond do not collide.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::SubmitInFlight` on a repeated click, or
    /// `CoreError::InvalidTransition` if the modal is not editing.
    pub fn begin_submit(
        &mut self,
        now: DateTime<Utc>,
        entropy: [u8; 2],
    ) -> Result<Submission, CoreError> {
        if self.state == PopupState::Submitting {
            return Err(CoreError::SubmitInFlight);
        }
        self.require(PopupState::Editing, "submitting")?;
        let form_type = self.form_type.ok_or_else(|| {
            CoreError::Validation("popup form opened without a form type".into())
        })?;

        let mut fields = self.fields.clone();
        fields.insert(
            "formType".to_string(),
            Value::String(form_type.as_str().to_string()),
        );

        self.state = PopupState::Submitting;
        self.last_error = None;

        Ok(Submission {
            id: ids::suffixed_id(now, entropy),
            submitted_at: ids::format_timestamp(now),
            status: SubmissionStatus::New,
            fields,
        })
    }

    /// The API accepted the submission.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` unless a submission is in flight.
    pub fn succeed(&mut self) -> Result<Redirect, CoreError> {
        self.require(PopupState::Submitting, "succeeded")?;
        let form_type = self.form_type.ok_or_else(|| {
            CoreError::Validation("popup form opened without a form type".into())
        })?;
        self.state = PopupState::Succeeded;
        Ok(Redirect {
            delay: REDIRECT_DELAY,
            location: confirmation_route(form_type),
        })
    }

    /// The API rejected the submission or the request failed. Fields are
    /// kept so the visitor can retry.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` unless a submission is in flight.
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), CoreError> {
        self.require(PopupState::Submitting, "editing")?;
        self.state = PopupState::Editing;
        self.last_error = Some(reason.into());
        Ok(())
    }

    /// Close the modal and discard collected values.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::SubmitInFlight` while a submission is in flight.
    pub fn close(&mut self) -> Result<(), CoreError> {
        if self.state == PopupState::Submitting {
            return Err(CoreError::SubmitInFlight);
        }
        *self = Self::new();
        Ok(())
    }

    fn require(&self, expected: PopupState, to: &str) -> Result<(), CoreError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                entity_type: "popup_form".into(),
                id: self.form_type.map_or("unbound", FormType::as_str).into(),
                from: self.state.to_string(),
                to: to.into(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 2, 12, 0, 0).unwrap()
    }

    const ENTROPY: [u8; 2] = [0x0a, 0x1f];

    fn editing(form_type: FormType) -> PopupForm {
        let mut form = PopupForm::new();
        form.open(form_type).unwrap();
        form.set_field("name", "Jane").unwrap();
        form.set_field("email", "jane@x.com").unwrap();
        form
    }

    #[test]
    fn full_happy_path() {
        let mut form = editing(FormType::SeoAudit);
        assert!(form.is_submit_enabled());

        let record = form.begin_submit(now(), ENTROPY).unwrap();
        assert_eq!(form.state(), PopupState::Submitting);
        assert!(!form.is_submit_enabled());
        assert_eq!(record.id, "sub-1775131200000-0a1f");
        assert_eq!(record.submitted_at, "2026-04-02T12:00:00.000Z");
        assert_eq!(record.status, SubmissionStatus::New);
        assert_eq!(record.field("formType"), Some("seo-audit"));
        assert_eq!(record.email(), Some("jane@x.com"));

        let redirect = form.succeed().unwrap();
        assert_eq!(redirect.delay, REDIRECT_DELAY);
        assert_eq!(redirect.location, "/thank-you?type=seo-audit");

        form.close().unwrap();
        assert_eq!(form.state(), PopupState::Closed);
        assert_eq!(form.form_type(), None);
    }

    #[test]
    fn repeated_submit_is_rejected_while_in_flight() {
        let mut form = editing(FormType::Contact);
        form.begin_submit(now(), ENTROPY).unwrap();
        assert!(matches!(
            form.begin_submit(now(), ENTROPY),
            Err(CoreError::SubmitInFlight)
        ));
        assert!(matches!(form.close(), Err(CoreError::SubmitInFlight)));
    }

    #[test]
    fn failure_returns_to_editing_with_message() {
        let mut form = editing(FormType::AdsAudit);
        form.begin_submit(now(), ENTROPY).unwrap();
        form.fail("Failed to save submission").unwrap();

        assert_eq!(form.state(), PopupState::Editing);
        assert_eq!(form.last_error(), Some("Failed to save submission"));
        assert!(form.is_submit_enabled());

        let retry = form.begin_submit(now(), ENTROPY).unwrap();
        assert_eq!(retry.field("name"), Some("Jane"));
        assert_eq!(form.last_error(), None);
    }

    #[test]
    fn cannot_edit_or_submit_when_closed() {
        let mut form = PopupForm::new();
        assert!(matches!(
            form.set_field("name", "x"),
            Err(CoreError::InvalidTransition { .. })
        ));
        assert!(matches!(
            form.begin_submit(now(), ENTROPY),
            Err(CoreError::InvalidTransition { .. })
        ));
        assert!(matches!(
            form.succeed(),
            Err(CoreError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn reopening_rebinds_and_clears_fields() {
        let mut form = editing(FormType::Contact);
        form.open(FormType::Consultation).unwrap();
        assert_eq!(form.form_type(), Some(FormType::Consultation));
        let record = form.begin_submit(now(), ENTROPY).unwrap();
        assert_eq!(record.field("name"), None);
        assert_eq!(record.field("formType"), Some("consultation"));
    }

    #[test]
    fn record_keys_cannot_be_typed_by_the_visitor() {
        let mut form = editing(FormType::Contact);
        for key in ["id", "submittedAt", "status", "formType"] {
            assert!(matches!(
                form.set_field(key, "visitor-typed"),
                Err(CoreError::Validation(_))
            ));
        }

        let record = form.begin_submit(now(), ENTROPY).unwrap();
        let wire = serde_json::to_string(&record).unwrap();
        assert_eq!(wire.matches("\"id\"").count(), 1);
        assert_eq!(wire.matches("\"formType\"").count(), 1);
        assert_eq!(record.id, "sub-1775131200000-0a1f");
        assert_eq!(record.field("formType"), Some("contact"));
    }

    #[test]
    fn same_millisecond_submits_get_distinct_ids() {
        let mut first = editing(FormType::Contact);
        let mut second = editing(FormType::Contact);
        let a = first.begin_submit(now(), [0x00, 0x01]).unwrap();
        let b = second.begin_submit(now(), [0xbe, 0xef]).unwrap();
        assert_eq!(a.id, "sub-1775131200000-0001");
        assert_eq!(b.id, "sub-1775131200000-beef");
    }

    #[test]
    fn confirmation_routes_per_form_type() {
        assert_eq!(confirmation_route(FormType::Contact), "/thank-you?type=contact");
        assert_eq!(
            confirmation_route(FormType::Consultation),
            "/thank-you?type=consultation"
        );
    }
}
