use anyhow::Context;
use lead_client::LeadClient;
use lead_config::LeadConfig;

use crate::cli::{AdminArgs, Cli, Commands, ServerArgs};
use crate::output::table::TableOptions;

pub mod dashboard;
pub mod serve;
pub mod status;
pub mod submit;

pub async fn dispatch(cli: &Cli, config: LeadConfig) -> anyhow::Result<()> {
    let options = TableOptions::detect(cli.quiet);
    match &cli.command {
        Commands::Serve(args) => serve::handle(args, config).await,
        Commands::Dashboard(args) => dashboard::handle(args, &config, cli.format, options).await,
        Commands::Submit(args) => submit::handle(args, &config, cli.format, options).await,
        Commands::Status(args) => status::handle(args, &config, cli.format, options).await,
    }
}

/// Explicit `--url`, else the configured bind address. Wildcard hosts are
/// reached through loopback.
pub fn base_url(server: &ServerArgs, config: &LeadConfig) -> String {
    if let Some(url) = &server.url {
        return url.clone();
    }
    let host = match config.server.host.as_str() {
        "0.0.0.0" | "" => "127.0.0.1",
        "::" | "[::]" => "[::1]",
        other => other,
    };
    format!("http://{host}:{}", config.server.port)
}

/// Client logged in as the admin.
pub async fn admin_client(
    server: &ServerArgs,
    admin: &AdminArgs,
    config: &LeadConfig,
) -> anyhow::Result<LeadClient> {
    let url = base_url(server, config);
    let mut client = LeadClient::new(&url)?;
    let email = admin.email.as_deref().unwrap_or(&config.admin.email);
    let password = admin.password.as_deref().unwrap_or(&config.admin.password);
    client
        .login(email, password)
        .await
        .with_context(|| format!("admin login to {url} failed"))?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn base_url_prefers_explicit_flag() {
        let server = ServerArgs {
            url: Some("https://leads.agency.example".into()),
        };
        assert_eq!(
            base_url(&server, &LeadConfig::default()),
            "https://leads.agency.example"
        );
    }

    #[test]
    fn base_url_reaches_wildcard_bind_through_loopback() {
        let mut config = LeadConfig::default();
        config.server.host = "0.0.0.0".into();
        config.server.port = 8080;
        assert_eq!(
            base_url(&ServerArgs { url: None }, &config),
            "http://127.0.0.1:8080"
        );

        config.server.host = "10.0.0.5".into();
        assert_eq!(
            base_url(&ServerArgs { url: None }, &config),
            "http://10.0.0.5:8080"
        );
    }
}
