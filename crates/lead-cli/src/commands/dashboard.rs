use anyhow::Context;
use lead_config::LeadConfig;
use lead_core::dashboard::{Dashboard, DashboardFilter};
use lead_core::enums::Category;

use crate::cli::{DashboardArgs, OutputFormat};
use crate::output::{self, table::TableOptions};

pub async fn handle(
    args: &DashboardArgs,
    config: &LeadConfig,
    format: OutputFormat,
    options: TableOptions,
) -> anyhow::Result<()> {
    let mut client = super::admin_client(&args.server, &args.admin, config).await?;

    let (general, contact) = tokio::try_join!(
        client.list(Category::General),
        client.list(Category::Contact)
    )
    .context("failed to fetch submissions")?;

    let filter = DashboardFilter {
        category: args.category,
        status: args.status,
        form_type: args.form,
        search: args.search.clone(),
    };
    let dashboard = Dashboard::build(&general, &contact, &filter);
    tracing::debug!(
        total = dashboard.counts.total,
        shown = dashboard.rows.len(),
        "dashboard built"
    );

    if let Err(error) = client.logout().await {
        tracing::warn!(%error, "admin logout failed");
    }
    output::output_dashboard(&dashboard, format, options)
}
