//! Admin dashboard aggregation.
//!
//! The dashboard is read-only: it receives both full lists, counts them and
//! filters rows client-side. Counts always cover every record; filters only
//! narrow the rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{Category, FormType, SubmissionStatus};
use crate::submission::Submission;

/// Row filters. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardFilter {
    pub category: Option<Category>,
    pub status: Option<SubmissionStatus>,
    pub form_type: Option<FormType>,
    /// Case-insensitive substring match over name, email, phone and message.
    pub search: Option<String>,
}

impl DashboardFilter {
    #[must_use]
    pub fn matches(&self, category: Category, submission: &Submission) -> bool {
        if self.category.is_some_and(|c| c != category) {
            return false;
        }
        if self.status.is_some_and(|s| s != submission.status) {
            return false;
        }
        if let Some(form_type) = self.form_type {
            if submission.form_type() != Some(form_type) {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                let name = submission.display_name();
                [
                    name.as_deref(),
                    submission.email(),
                    submission.field("phone"),
                    submission.message(),
                ]
                .into_iter()
                .flatten()
                .any(|haystack| haystack.to_lowercase().contains(&needle))
            }
        }
    }
}

/// Record counts across both categories.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardCounts {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
    /// Popup form types; contact-page records count as `contact-page`.
    pub by_form_type: BTreeMap<String, usize>,
}

/// One dashboard line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardRow {
    pub category: Category,
    pub id: String,
    pub submitted_at: String,
    pub status: SubmissionStatus,
    pub name: String,
    pub email: String,
    pub form: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dashboard {
    pub counts: DashboardCounts,
    pub rows: Vec<DashboardRow>,
}

impl Dashboard {
    /// Build the dashboard view from both lists. Rows are newest first by
    /// `submittedAt`; records with unparsable timestamps sort last.
    #[must_use]
    pub fn build(general: &[Submission], contact: &[Submission], filter: &DashboardFilter) -> Self {
        let all = general
            .iter()
            .map(|s| (Category::General, s))
            .chain(contact.iter().map(|s| (Category::Contact, s)));

        let mut counts = DashboardCounts::default();
        for status in SubmissionStatus::ALL {
            counts.by_status.insert(status.as_str().to_string(), 0);
        }
        let mut selected = Vec::new();

        for (category, submission) in all {
            counts.total += 1;
            *counts
                .by_status
                .entry(submission.status.as_str().to_string())
                .or_default() += 1;
            *counts
                .by_category
                .entry(category.as_str().to_string())
                .or_default() += 1;
            *counts.by_form_type.entry(form_label(category, submission)).or_default() += 1;

            if filter.matches(category, submission) {
                selected.push((category, submission));
            }
        }

        selected.sort_by(|(_, a), (_, b)| b.submitted_at_time().cmp(&a.submitted_at_time()));

        let rows = selected
            .into_iter()
            .map(|(category, s)| DashboardRow {
                category,
                id: s.id.clone(),
                submitted_at: s.submitted_at.clone(),
                status: s.status,
                name: s.display_name().unwrap_or_default(),
                email: s.email().unwrap_or_default().to_string(),
                form: form_label(category, s),
                message: s.message().unwrap_or_default().to_string(),
            })
            .collect();

        Self { counts, rows }
    }
}

fn form_label(category: Category, submission: &Submission) -> String {
    match category {
        Category::Contact => "contact-page".to_string(),
        Category::General => submission
            .form_type()
            .map_or_else(|| "other".to_string(), |f| f.as_str().to_string()),
    }
}
