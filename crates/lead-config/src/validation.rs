//! Request body validation configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Reject bodies that fail the schema with 400.
    #[default]
    Enforce,
    /// Log schema failures and store the body anyway.
    Warn,
    /// Skip schema checks.
    Off,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub mode: ValidationMode,
}
