//! # lead-config
//!
//! Layered configuration loading for leaddesk using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. `ADMIN_EMAIL`, `ADMIN_PASSWORD`, `ADMIN_AUTH_TOKEN`
//! 2. Environment variables (`LEADDESK_*` prefix, `__` as separator)
//! 3. Project-level `leaddesk.toml`
//! 4. User-level `~/.config/leaddesk/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LEADDESK_SERVER__PORT` -> `server.port`,
//! `LEADDESK_STORE__BACKEND` -> `store.backend`, etc. The three unprefixed
//! `ADMIN_*` names map onto the `admin` section.
//!
//! # Usage
//!
//! ```no_run
//! use lead_config::LeadConfig;
//!
//! let config = LeadConfig::load_with_dotenv().expect("config");
//! println!("listening on {}", config.server.bind_address());
//! ```

mod admin;
mod error;
mod server;
mod store;
mod validation;

pub use admin::{
    AdminConfig, DEFAULT_ADMIN_AUTH_TOKEN, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD,
    SessionMode,
};
pub use error::ConfigError;
pub use server::ServerConfig;
pub use store::{StoreBackend, StoreConfig};
pub use validation::{ValidationConfig, ValidationMode};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "leaddesk.toml";

/// Unprefixed admin variables read for compatibility with existing deployments.
const LEGACY_ADMIN_VARS: [&str; 3] = ["ADMIN_EMAIL", "ADMIN_PASSWORD", "ADMIN_AUTH_TOKEN"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LeadConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl LeadConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load configuration with an explicit TOML file layered above the
    /// project file and below the environment. Does NOT call `dotenvy`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingFile` if `path` does not exist, or any
    /// error [`Self::load`] can return.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        let config: Self = Self::figment_with_file(Some(path)).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_with_file(None)
    }

    fn figment_with_file(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 3: Prefixed environment variables
        figment = figment.merge(Env::prefixed("LEADDESK_").split("__"));

        // Layer 4: Legacy admin variables (highest priority)
        figment.merge(
            Env::raw()
                .only(&LEGACY_ADMIN_VARS)
                .map(|key| {
                    key.as_str()
                        .to_ascii_lowercase()
                        .replacen("admin_", "admin.", 1)
                        .into()
                }),
        )
    }

    /// Human-readable warnings about risky settings, logged at startup.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let defaults = self.admin.fields_using_defaults();
        if !defaults.is_empty() {
            warnings.push(format!(
                "admin {} still use built-in defaults; set ADMIN_EMAIL, ADMIN_PASSWORD and ADMIN_AUTH_TOKEN before deploying",
                defaults.join(", ")
            ));
        }

        if !self.admin.secure_cookie {
            warnings.push(
                "admin session cookie is sent without Secure; enable admin.secure_cookie behind HTTPS"
                    .to_string(),
            );
        }

        warnings
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.auth_token.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "admin.auth_token".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.admin.cookie_max_age_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "admin.cookie_max_age_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("leaddesk").join("config.toml"))
    }
}
