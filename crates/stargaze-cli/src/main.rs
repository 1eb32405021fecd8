// SPDX-License-Identifier: Apache-2.0

//! Stargaze - rank registry modules by the GitHub stars of their repositories.
//!
//! Lists the GitHub-hosted modules of a registry, fetches every repository
//! with a bounded number of requests in flight, and renders the ranking.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;
mod provider;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use stargaze_core::{AppConfig, config};
use tracing::{debug, warn};

use crate::cli::{Cli, OutputContext, OutputFormat};

/// Applies command-line overrides on top of the loaded configuration.
fn apply_overrides(cli: &Cli, config: &mut AppConfig) {
    if let Some(concurrency) = cli.concurrency {
        config.fetch.concurrency = concurrency;
        debug!("Overriding concurrency to: {concurrency}");
    }

    if let Some(registry) = &cli.registry {
        config.registry.url.clone_from(registry);
        debug!("Overriding registry URL to: {registry}");
    }

    if let Some(out) = &cli.out {
        if !cli.format.writes_file() {
            warn!("--out only applies to tsv and markdown output");
        }
        match cli.format {
            OutputFormat::Tsv => config.output.tsv_path.clone_from(out),
            OutputFormat::Markdown => config.output.markdown_path.clone_from(out),
            OutputFormat::Table | OutputFormat::Json | OutputFormat::Yaml => {}
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let output_ctx = OutputContext::from_cli(cli.format, cli.quiet);

    let mut config = config::load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");
    apply_overrides(&cli, &mut config);

    commands::run(cli, output_ctx, &config).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let formatted = errors::format_error(&e);
            eprintln!("Error: {formatted}");
            ExitCode::FAILURE
        }
    }
}
