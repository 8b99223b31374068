use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use lead_core::enums::{Category, FormType, SubmissionStatus};

/// Output mode shared by every command.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Top-level CLI parser for the `leaddesk` binary.
#[derive(Debug, Parser)]
#[command(
    name = "leaddesk",
    version,
    about = "leaddesk - lead capture API and admin dashboard"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: table, json
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file layered above leaddesk.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Show submission counts and rows from a running server
    Dashboard(DashboardArgs),
    /// Submit a lead the way the site's forms do
    Submit(SubmitArgs),
    /// Change the follow-up status of one submission
    Status(StatusArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Interface to bind, overriding server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind, overriding server.port
    #[arg(long)]
    pub port: Option<u16>,
}

/// Where a running server lives.
#[derive(Debug, Args)]
pub struct ServerArgs {
    /// Base URL of the server (defaults to the configured bind address)
    #[arg(long)]
    pub url: Option<String>,
}

/// Admin credentials; fall back to the configured ones.
#[derive(Debug, Args)]
pub struct AdminArgs {
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub admin: AdminArgs,

    /// Only rows from this list: general, contact
    #[arg(long)]
    pub category: Option<Category>,

    /// Only rows with this status: new, contacted, closed
    #[arg(long)]
    pub status: Option<SubmissionStatus>,

    /// Only rows from this popup form
    #[arg(long)]
    pub form: Option<FormType>,

    /// Case-insensitive search over name, email, phone and message
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub server: ServerArgs,

    /// Popup form to submit: contact, seo-audit, ads-audit, consultation
    #[arg(long, required_unless_present = "contact_page")]
    pub form: Option<FormType>,

    /// Submit the contact page form instead of a popup
    #[arg(long, conflicts_with = "form")]
    pub contact_page: bool,

    /// Form field, repeatable
    #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub admin: AdminArgs,

    /// Submission list: general, contact
    pub category: Category,

    pub id: String,

    /// New status: new, contacted, closed
    pub status: SubmissionStatus,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty field name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "leaddesk",
            "serve",
            "--port",
            "8080",
            "--verbose",
            "--config",
            "staging.toml",
        ])
        .expect("cli should parse");

        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("staging.toml")));
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.host, None);
    }

    #[test]
    fn dashboard_filters_parse_into_enums() {
        let cli = Cli::try_parse_from([
            "leaddesk",
            "--format",
            "json",
            "dashboard",
            "--status",
            "contacted",
            "--form",
            "seo-audit",
            "--search",
            "plumb",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        let Commands::Dashboard(args) = cli.command else {
            panic!("expected dashboard");
        };
        assert_eq!(args.status, Some(SubmissionStatus::Contacted));
        assert_eq!(args.form, Some(FormType::SeoAudit));
        assert_eq!(args.category, None);
        assert_eq!(args.search.as_deref(), Some("plumb"));
    }

    #[test]
    fn dashboard_rejects_unknown_status() {
        let parsed = Cli::try_parse_from(["leaddesk", "dashboard", "--status", "won"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn submit_collects_repeated_fields() {
        let cli = Cli::try_parse_from([
            "leaddesk",
            "submit",
            "--form",
            "ads-audit",
            "--field",
            "email=sam@x.io",
            "--field",
            "message=a=b",
        ])
        .expect("cli should parse");

        let Commands::Submit(args) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(args.form, Some(FormType::AdsAudit));
        assert!(!args.contact_page);
        assert_eq!(
            args.fields,
            vec![
                ("email".to_string(), "sam@x.io".to_string()),
                ("message".to_string(), "a=b".to_string()),
            ]
        );
    }

    #[test]
    fn submit_requires_a_form_or_contact_page() {
        assert!(Cli::try_parse_from(["leaddesk", "submit"]).is_err());
        assert!(
            Cli::try_parse_from(["leaddesk", "submit", "--contact-page", "--form", "contact"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["leaddesk", "submit", "--contact-page"]).is_ok());
    }

    #[test]
    fn field_without_equals_is_rejected() {
        assert!(parse_field("email").is_err());
        assert!(parse_field("=value").is_err());
    }

    #[test]
    fn status_takes_positionals() {
        let cli = Cli::try_parse_from(["leaddesk", "status", "contact", "sub-1", "closed"])
            .expect("cli should parse");
        let Commands::Status(args) = cli.command else {
            panic!("expected status");
        };
        assert_eq!(args.category, Category::Contact);
        assert_eq!(args.id, "sub-1");
        assert_eq!(args.status, SubmissionStatus::Closed);
    }
}
