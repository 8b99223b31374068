//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed cwd and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use lead_config::{LeadConfig, SessionMode, StoreBackend, ValidationMode};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

#[test]
fn loads_every_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
host = "127.0.0.1"
port = 8081
cors_origins = ["https://agency.example"]

[store]
backend = "libsql"
data_dir = "/var/lib/leaddesk"
database_file = "leads.db"

[admin]
email = "owner@agency.example"
password = "hunter22"
auth_token = "tok-from-toml"
session_mode = "signed"
cookie_max_age_secs = 3600
secure_cookie = true

[validation]
mode = "warn"
"#,
        )?;

        let config: LeadConfig = Figment::from(Serialized::defaults(LeadConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.server.bind_address(), "127.0.0.1:8081");
        assert_eq!(config.server.cors_origins, vec!["https://agency.example"]);
        assert_eq!(config.store.backend, StoreBackend::Libsql);
        assert_eq!(
            config.store.database_path(),
            PathBuf::from("/var/lib/leaddesk/leads.db")
        );
        assert_eq!(config.admin.email, "owner@agency.example");
        assert_eq!(config.admin.session_mode, SessionMode::Signed);
        assert_eq!(config.admin.cookie_max_age_secs, 3600);
        assert!(config.admin.secure_cookie);
        assert_eq!(config.validation.mode, ValidationMode::Warn);
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "leaddesk.toml",
            r#"
[server]
port = 9000

[store]
data_dir = "leads"
"#,
        )?;

        let config = LeadConfig::load().expect("config loads");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.store.data_dir, PathBuf::from("leads"));
        assert_eq!(config.store.backend, StoreBackend::Json);
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults_for_missing_fields() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "leaddesk.toml",
            r#"
[admin]
email = "someone@agency.example"
"#,
        )?;

        let config = LeadConfig::load().expect("config loads");
        assert_eq!(config.admin.email, "someone@agency.example");
        assert_eq!(config.admin.password, lead_config::DEFAULT_ADMIN_PASSWORD);
        assert_eq!(config.admin.cookie_max_age_secs, 604_800);
        Ok(())
    });
}

#[test]
fn invalid_backend_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "leaddesk.toml",
            r#"
[store]
backend = "postgres"
"#,
        )?;

        assert!(LeadConfig::load().is_err());
        Ok(())
    });
}

#[test]
fn zero_cookie_lifetime_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "leaddesk.toml",
            r#"
[admin]
cookie_max_age_secs = 0
"#,
        )?;

        let err = LeadConfig::load().expect_err("zero max-age must fail");
        assert!(err.to_string().contains("cookie_max_age_secs"));
        Ok(())
    });
}

#[test]
fn explicit_file_overrides_project_file() {
    Jail::expect_with(|jail| {
        jail.create_file("leaddesk.toml", "[server]\nport = 9000\nhost = \"127.0.0.1\"\n")?;
        jail.create_file("staging.toml", "[server]\nport = 9100\n")?;
        jail.set_env("LEADDESK_VALIDATION__MODE", "off");

        let config = LeadConfig::load_from_file(std::path::Path::new("staging.toml"))
            .expect("config loads");
        assert_eq!(config.server.bind_address(), "127.0.0.1:9100");
        assert_eq!(config.validation.mode, ValidationMode::Off);
        Ok(())
    });
}

#[test]
fn missing_explicit_file_is_an_error() {
    Jail::expect_with(|_jail| {
        let err = LeadConfig::load_from_file(std::path::Path::new("nope.toml"))
            .expect_err("missing file must fail");
        assert!(matches!(err, lead_config::ConfigError::MissingFile(_)));
        Ok(())
    });
}
