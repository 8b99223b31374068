//! Submission records and the payload shapes accepted by the API.
//!
//! A stored [`Submission`] keeps the three lifecycle fields typed and every
//! other field of the posted body verbatim in `fields`, so a record read back
//! serializes to the same JSON object that was posted.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::{FormType, SubmissionStatus};
use crate::errors::CoreError;
use crate::ids;

/// Keys owned by the record itself rather than by the visitor's input.
pub const RESERVED_FIELDS: [&str; 3] = ["id", "submittedAt", "status"];

/// A single lead captured from a site visitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub id: String,
    #[serde(rename = "submittedAt")]
    pub submitted_at: String,
    pub status: SubmissionStatus,
    /// Contact details and category-specific fields, stored as posted.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Submission {
    /// Build a new record from a posted JSON object.
    ///
    /// - `id` is kept when supplied (numbers are stringified), otherwise
    ///   generated from `now` and `entropy`.
    /// - `submittedAt` is kept when supplied and must be RFC 3339, otherwise
    ///   set to `now`.
    /// - `status` is always `new`; a client-supplied value is discarded.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `id` or `submittedAt` has the wrong
    /// type, or `submittedAt` is not a timestamp.
    pub fn from_payload(
        mut body: Map<String, Value>,
        now: DateTime<Utc>,
        entropy: [u8; 2],
    ) -> Result<Self, CoreError> {
        let id = match body.remove("id") {
            None | Some(Value::Null) => ids::suffixed_id(now, entropy),
            Some(Value::String(s)) if s.trim().is_empty() => ids::suffixed_id(now, entropy),
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(CoreError::Validation(format!(
                    "id must be a string, got {}",
                    json_type_name(&other)
                )));
            }
        };

        let submitted_at = match body.remove("submittedAt") {
            None | Some(Value::Null) => ids::format_timestamp(now),
            Some(Value::String(s)) => {
                if ids::parse_timestamp(&s).is_none() {
                    return Err(CoreError::Validation(format!(
                        "submittedAt '{s}' is not an ISO-8601 timestamp"
                    )));
                }
                s
            }
            Some(other) => {
                return Err(CoreError::Validation(format!(
                    "submittedAt must be a string, got {}",
                    json_type_name(&other)
                )));
            }
        };

        body.remove("status");

        Ok(Self {
            id,
            submitted_at,
            status: SubmissionStatus::New,
            fields: body,
        })
    }

    /// A payload field as a string, if present and a string.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// `name`, or `firstName` + `lastName` for forms that split it.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        if let Some(name) = self.field("name").filter(|n| !n.trim().is_empty()) {
            return Some(name.trim().to_string());
        }
        let parts: Vec<&str> = ["firstName", "lastName"]
            .iter()
            .filter_map(|key| self.field(key))
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.field("email")
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }

    /// The popup form this came from. `None` for contact-page records and
    /// unrecognised values.
    #[must_use]
    pub fn form_type(&self) -> Option<FormType> {
        self.field("formType").and_then(|f| f.parse().ok())
    }

    /// `submittedAt` parsed, if it is a valid timestamp.
    #[must_use]
    pub fn submitted_at_time(&self) -> Option<DateTime<Utc>> {
        ids::parse_timestamp(&self.submitted_at)
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Body accepted by `POST /api/submissions/save` (popup forms).
///
/// Only used to derive the validation schema; the stored record keeps the
/// original body. Unknown fields are allowed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSubmissionPayload {
    pub id: Option<String>,
    pub submitted_at: Option<String>,
    pub status: Option<SubmissionStatus>,
    pub form_type: Option<FormType>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub message: Option<String>,
    pub project_type: Option<String>,
    pub seo_goal: Option<String>,
    pub ad_spend: Option<String>,
    pub budget: Option<String>,
    pub service: Option<String>,
}

/// Body accepted by `POST /api/submissions/contact/save` (contact page).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmissionPayload {
    pub id: Option<String>,
    pub submitted_at: Option<String>,
    pub status: Option<SubmissionStatus>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub service: Option<String>,
    pub budget: Option<String>,
    pub message: Option<String>,
}
