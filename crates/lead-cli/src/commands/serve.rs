use lead_config::LeadConfig;

use crate::cli::ServeArgs;

pub async fn handle(args: &ServeArgs, mut config: LeadConfig) -> anyhow::Result<()> {
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    for warning in config.warnings() {
        tracing::warn!("{warning}");
    }
    lead_server::run(config).await
}
