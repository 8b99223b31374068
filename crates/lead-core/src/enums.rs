//! Status, category and form-type enums.
//!
//! `SubmissionStatus` serializes lowercase, `FormType` kebab-case, matching
//! the values the site's forms post. `SubmissionStatus` provides
//! `allowed_next_states()` to enforce valid transitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// SubmissionStatus
// ---------------------------------------------------------------------------

/// Follow-up status of a lead.
///
/// ```text
/// new → contacted → closed
/// new → closed
/// closed → new (reopened)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    New,
    Contacted,
    Closed,
}

impl SubmissionStatus {
    pub const ALL: [Self; 3] = [Self::New, Self::Contacted, Self::Closed];

    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::New => &[Self::Contacted, Self::Closed],
            Self::Contacted => &[Self::Closed],
            Self::Closed => &[Self::New],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "closed" => Ok(Self::Closed),
            other => Err(CoreError::Validation(format!("unknown status '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Which submission list a record belongs to. Each category is isolated in
/// its own file (or its own partition of the database table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Popup forms: general contact, SEO audit, ads audit, consultation.
    General,
    /// The static contact page form.
    Contact,
}

impl Category {
    pub const ALL: [Self; 2] = [Self::General, Self::Contact];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Contact => "contact",
        }
    }

    /// Backing file name under the data directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::General => "submissions.json",
            Self::Contact => "contact-submissions.json",
        }
    }

    /// API route accepting `GET` and `POST` for this list.
    #[must_use]
    pub const fn save_path(self) -> &'static str {
        match self {
            Self::General => "/api/submissions/save",
            Self::Contact => "/api/submissions/contact/save",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Self::General),
            "contact" => Ok(Self::Contact),
            other => Err(CoreError::Validation(format!("unknown category '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// FormType
// ---------------------------------------------------------------------------

/// The popup form a trigger element opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FormType {
    Contact,
    SeoAudit,
    AdsAudit,
    Consultation,
}

impl FormType {
    pub const ALL: [Self; 4] = [
        Self::Contact,
        Self::SeoAudit,
        Self::AdsAudit,
        Self::Consultation,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::SeoAudit => "seo-audit",
            Self::AdsAudit => "ads-audit",
            Self::Consultation => "consultation",
        }
    }

    /// Human-readable modal title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Contact => "Get in Touch",
            Self::SeoAudit => "Free SEO Audit",
            Self::AdsAudit => "Free Google Ads Audit",
            Self::Consultation => "Book a Free Consultation",
        }
    }

    /// All popup forms post to the general list.
    #[must_use]
    pub const fn category(self) -> Category {
        Category::General
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contact" => Ok(Self::Contact),
            "seo-audit" => Ok(Self::SeoAudit),
            "ads-audit" => Ok(Self::AdsAudit),
            "consultation" => Ok(Self::Consultation),
            other => Err(CoreError::Validation(format!("unknown form type '{other}'"))),
        }
    }
}
