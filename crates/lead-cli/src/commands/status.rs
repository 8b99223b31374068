use anyhow::Context;
use lead_config::LeadConfig;

use crate::cli::{OutputFormat, StatusArgs};
use crate::output::{self, table::TableOptions};

pub async fn handle(
    args: &StatusArgs,
    config: &LeadConfig,
    format: OutputFormat,
    options: TableOptions,
) -> anyhow::Result<()> {
    let mut client = super::admin_client(&args.server, &args.admin, config).await?;
    let result = client
        .update_status(args.category, &args.id, args.status)
        .await
        .with_context(|| format!("failed to move {} {} to {}", args.category, args.id, args.status));

    if let Err(error) = client.logout().await {
        tracing::warn!(%error, "admin logout failed");
    }
    let updated = result?;

    let pairs = [
        ("id", updated.id.clone()),
        ("category", args.category.to_string()),
        ("status", updated.status.to_string()),
        ("submittedAt", updated.submitted_at.clone()),
    ];
    output::output_pairs(&updated, &pairs, format, options)
}
