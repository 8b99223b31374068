use std::path::Path;

use anyhow::Context;
use clap::Parser;
use lead_config::LeadConfig;

mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("leaddesk error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let serving = matches!(cli.command, cli::Commands::Serve(_));
    init_tracing(cli.quiet, cli.verbose, serving)?;

    let config = load_config(cli.config.as_deref())?;
    commands::dispatch(&cli, config).await
}

fn init_tracing(quiet: bool, verbose: bool, serving: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else if serving {
        "info"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("LEADDESK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<LeadConfig> {
    match explicit {
        Some(path) => {
            let _ = dotenvy::dotenv();
            LeadConfig::load_from_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))
        }
        None => LeadConfig::load_with_dotenv().context("failed to load leaddesk configuration"),
    }
}
