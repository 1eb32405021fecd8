// SPDX-License-Identifier: Apache-2.0

//! Command handlers for Stargaze CLI.

pub mod rank;
pub mod types;

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use stargaze_core::AppConfig;

use crate::cli::{Cli, OutputContext};
use crate::output;
use crate::provider::CliTokenProvider;

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if ctx.is_interactive() {
        let s = ProgressBar::new_spinner();
        s.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid spinner template"),
        );
        s.set_message(message.to_string());
        s.enable_steady_tick(Duration::from_millis(100));
        Some(s)
    } else {
        None
    }
}

/// Creates a progress bar over `total` fetches (only if interactive).
fn maybe_progress(ctx: &OutputContext, total: usize, message: &str) -> Option<ProgressBar> {
    if ctx.is_interactive() && total > 0 {
        let bar = ProgressBar::new(u64::try_from(total).unwrap_or(u64::MAX));
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .expect("Invalid progress template")
                .progress_chars("=> "),
        );
        bar.set_message(message.to_string());
        Some(bar)
    } else {
        None
    }
}

/// Run the rank command with the parsed arguments.
pub async fn run(cli: Cli, ctx: OutputContext, config: &AppConfig) -> Result<()> {
    let provider = CliTokenProvider::new(cli.username, cli.password);
    let request = rank::RankRequest {
        repos: &cli.repos,
        sampling: cli.sampling,
    };

    let result = rank::run(&request, &provider, &ctx, config).await?;
    output::render_rank(&result, &ctx, &config.output)
}
