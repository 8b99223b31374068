use anyhow::Context;
use chrono::Utc;
use lead_client::LeadClient;
use lead_config::LeadConfig;
use lead_core::enums::{Category, FormType, SubmissionStatus};
use lead_core::ids;
use lead_core::popup::PopupForm;
use lead_core::submission::{RESERVED_FIELDS, Submission};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::{OutputFormat, SubmitArgs};
use crate::output::{self, table::TableOptions};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitOutput {
    success: bool,
    id: String,
    category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<String>,
}

pub async fn handle(
    args: &SubmitArgs,
    config: &LeadConfig,
    format: OutputFormat,
    options: TableOptions,
) -> anyhow::Result<()> {
    let url = super::base_url(&args.server, config);
    let client = LeadClient::new(&url)?;

    let result = match (args.form, args.contact_page) {
        (Some(form_type), false) => submit_popup(&client, form_type, &args.fields).await?,
        (None, true) => submit_contact_page(&client, &args.fields).await?,
        _ => anyhow::bail!("pass exactly one of --form or --contact-page"),
    };

    let mut pairs = vec![
        ("id", result.id.clone()),
        ("category", result.category.to_string()),
    ];
    if let Some(redirect) = &result.redirect {
        pairs.push(("redirect", redirect.clone()));
    }
    output::output_pairs(&result, &pairs, format, options)
}

/// Drive the popup controller the way the browser does: open, fill, submit,
/// then report the API outcome back to it.
async fn submit_popup(
    client: &LeadClient,
    form_type: FormType,
    fields: &[(String, String)],
) -> anyhow::Result<SubmitOutput> {
    let mut form = PopupForm::new();
    form.open(form_type)?;
    for (name, value) in fields {
        form.set_field(name, value.clone())?;
    }
    let record = form.begin_submit(Utc::now(), id_entropy()?)?;

    match client.save(form_type.category(), &record).await {
        Ok(saved) => {
            let redirect = form.succeed()?;
            tracing::debug!(id = %saved.id, location = %redirect.location, "popup submission accepted");
            Ok(SubmitOutput {
                success: true,
                id: saved.id,
                category: form_type.category(),
                redirect: Some(redirect.location),
            })
        }
        Err(error) => {
            form.fail(error.to_string())?;
            Err(error).with_context(|| format!("{form_type} submission was not saved"))
        }
    }
}

async fn submit_contact_page(
    client: &LeadClient,
    fields: &[(String, String)],
) -> anyhow::Result<SubmitOutput> {
    if let Some((name, _)) = fields
        .iter()
        .find(|(name, _)| RESERVED_FIELDS.contains(&name.as_str()))
    {
        anyhow::bail!("'{name}' is set by the form, not passed as --field");
    }

    let now = Utc::now();
    let fields: Map<String, Value> = fields
        .iter()
        .map(|(name, value)| (name.clone(), Value::String(value.clone())))
        .collect();
    let record = Submission {
        id: ids::suffixed_id(now, id_entropy()?),
        submitted_at: ids::format_timestamp(now),
        status: SubmissionStatus::New,
        fields,
    };

    let saved = client
        .save(Category::Contact, &record)
        .await
        .context("contact page submission was not saved")?;
    Ok(SubmitOutput {
        success: true,
        id: saved.id,
        category: Category::Contact,
        redirect: None,
    })
}

fn id_entropy() -> anyhow::Result<[u8; 2]> {
    let mut bytes = [0u8; 2];
    getrandom::fill(&mut bytes).map_err(|e| anyhow::anyhow!("failed to generate id suffix: {e}"))?;
    Ok(bytes)
}
