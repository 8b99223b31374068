use lead_core::dashboard::{Dashboard, DashboardCounts};
use serde::Serialize;

use crate::cli::OutputFormat;

pub mod table;

use table::{TableOptions, render_table};

const ROW_HEADERS: [&str; 8] = [
    "submitted", "category", "form", "status", "name", "email", "id", "message",
];

/// Print `value` as pretty JSON, or as a two-column table of `pairs`.
pub fn output_pairs<T: Serialize>(
    value: &T,
    pairs: &[(&str, String)],
    format: OutputFormat,
    options: TableOptions,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = pairs
                .iter()
                .map(|(key, value)| vec![(*key).to_string(), value.clone()])
                .collect();
            println!("{}", render_table(&["key", "value"], &rows, options));
        }
    }
    Ok(())
}

pub fn output_dashboard(
    dashboard: &Dashboard,
    format: OutputFormat,
    options: TableOptions,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(dashboard)?),
        OutputFormat::Table => println!("{}", render_dashboard(dashboard, options)),
    }
    Ok(())
}

fn render_dashboard(dashboard: &Dashboard, options: TableOptions) -> String {
    let mut out = render_counts(&dashboard.counts);
    out.push('\n');
    if dashboard.rows.is_empty() {
        out.push_str("No submissions match.");
        return out;
    }

    let rows: Vec<Vec<String>> = dashboard
        .rows
        .iter()
        .map(|row| {
            vec![
                row.submitted_at.clone(),
                row.category.to_string(),
                row.form.clone(),
                row.status.to_string(),
                row.name.clone(),
                row.email.clone(),
                row.id.clone(),
                row.message.replace(['\n', '\r'], " "),
            ]
        })
        .collect();
    out.push_str(&render_table(&ROW_HEADERS, &rows, options));
    out
}

fn render_counts(counts: &DashboardCounts) -> String {
    let join = |map: &std::collections::BTreeMap<String, usize>| {
        map.iter()
            .map(|(key, n)| format!("{key} {n}"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "Total: {}\nBy status: {}\nBy category: {}\nBy form: {}\n",
        counts.total,
        join(&counts.by_status),
        join(&counts.by_category),
        join(&counts.by_form_type),
    )
}
