//! Central schema registry for leaddesk request bodies.
//!
//! The `SchemaRegistry` builds JSON Schemas from lead-core types at
//! construction time using [`schemars::schema_for!`] and validates arbitrary
//! JSON values against them via `jsonschema`.

use std::collections::HashMap;

use lead_core::enums::Category;
use schemars::schema_for;

use crate::error::SchemaError;

pub const GENERAL_SUBMISSION: &str = "general_submission";
pub const CONTACT_SUBMISSION: &str = "contact_submission";
pub const LOGIN_REQUEST: &str = "login_request";
pub const STATUS_UPDATE_REQUEST: &str = "status_update_request";

/// Schema that validates a `POST` body for the given category.
#[must_use]
pub const fn schema_name_for(category: Category) -> &'static str {
    match category {
        Category::General => GENERAL_SUBMISSION,
        Category::Contact => CONTACT_SUBMISSION,
    }
}

/// Store of every request-body schema the API checks.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`.
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert(
            $name,
            serde_json::to_value(schema_for!($ty))
                .map_err(|e| SchemaError::Generation(format!("{}: {e}", $name)))?,
        );
    };
}

impl SchemaRegistry {
    /// Build a registry containing the submission, login and status-update
    /// schemas.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Generation` if a generated schema cannot be
    /// converted to JSON.
    pub fn new() -> Result<Self, SchemaError> {
        let mut schemas = HashMap::new();

        register!(
            schemas,
            GENERAL_SUBMISSION,
            lead_core::submission::GeneralSubmissionPayload
        );
        register!(
            schemas,
            CONTACT_SUBMISSION,
            lead_core::submission::ContactSubmissionPayload
        );
        register!(schemas, LOGIN_REQUEST, lead_core::responses::LoginRequest);
        register!(
            schemas,
            STATUS_UPDATE_REQUEST,
            lead_core::responses::StatusUpdateRequest
        );

        Ok(Self { schemas })
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` listing every violation.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| {
                let path = e.instance_path.to_string();
                if path.is_empty() {
                    format!("{e}")
                } else {
                    format!("{path}: {e}")
                }
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Validate a submission body for a category.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ValidationFailed` listing every violation.
    pub fn validate_submission(
        &self,
        category: Category,
        instance: &serde_json::Value,
    ) -> Result<(), SchemaError> {
        self.validate(schema_name_for(category), instance)
    }

    /// List all registered schema names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
