// SPDX-License-Identifier: Apache-2.0

//! Fetch, rank and summarize repositories.

use std::sync::Arc;

use anyhow::{Context, Result};
use stargaze_core::auth::TokenProvider;
use stargaze_core::registry::{self, RepoRef};
use stargaze_core::{
    AppConfig, ConcurrencyLimit, FetchSummary, GitHubClient, StargazeError, github,
    parse_owner_repo, pipeline, scheduler,
};
use tracing::{debug, info};

use super::types::RankResult;
use super::{maybe_progress, maybe_spinner};
use crate::cli::OutputContext;

/// What to rank and how.
pub struct RankRequest<'a> {
    /// Explicit `owner/repo` identifiers; the registry is used when empty.
    pub repos: &'a [String],
    /// Fetch only `fetch.sample_size` entries.
    pub sampling: bool,
}

/// Turns `owner/repo` arguments into references, keeping argument order.
fn explicit_refs(repos: &[String]) -> Result<Vec<RepoRef>> {
    repos
        .iter()
        .map(|arg| {
            let (owner, repo) = parse_owner_repo(arg)?;
            Ok(RepoRef {
                module: format!("{owner}/{repo}"),
                owner,
                repo,
            })
        })
        .collect()
}

/// Runs the whole fetch pipeline and returns the ranked repositories.
pub async fn run(
    request: &RankRequest<'_>,
    provider: &dyn TokenProvider,
    ctx: &OutputContext,
    config: &AppConfig,
) -> Result<RankResult> {
    // Reject a bad limit before any network traffic
    let limit = ConcurrencyLimit::try_from(config.fetch.concurrency)?;
    let credentials = provider
        .credentials()
        .ok_or(StargazeError::NotAuthenticated)?;
    let client = Arc::new(GitHubClient::new(&config.github, credentials)?);

    let mut refs = if request.repos.is_empty() {
        let spinner = maybe_spinner(ctx, "Loading registry...");
        let refs = registry::fetch_entries(client.http(), &config.registry.url)
            .await
            .with_context(|| format!("Failed to load registry from {}", config.registry.url))?;
        if let Some(s) = spinner {
            s.finish_and_clear();
        }
        refs
    } else {
        explicit_refs(request.repos)?
    };

    if request.sampling {
        refs = registry::sample(refs, config.fetch.sample_size);
        info!(sampled = refs.len(), "Sampling enabled");
    }

    let tasks = github::repository_tasks(&client, &refs);
    debug!(tasks = tasks.len(), limit = limit.get(), "Fetching repositories");

    let progress = maybe_progress(ctx, tasks.len(), "Fetching repositories");
    let outcomes = scheduler::run_with_progress(tasks, limit.get(), |completed, _total| {
        if let Some(bar) = &progress {
            bar.set_position(u64::try_from(completed).unwrap_or(u64::MAX));
        }
    })
    .await?;
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    let summary = FetchSummary::from_outcomes(&outcomes);
    let repositories = pipeline::rank(pipeline::successes(outcomes));

    Ok(RankResult {
        repositories,
        summary,
    })
}
