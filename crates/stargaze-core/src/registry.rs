// SPDX-License-Identifier: Apache-2.0

//! Module registry listing.
//!
//! The registry is a single JSON object mapping module names to their source
//! location, as published for deno.land/x:
//!
//! ```json
//! { "oak": { "type": "github", "owner": "oakserver", "repo": "oak", "desc": "..." } }
//! ```
//!
//! Only GitHub-hosted entries are turned into [`RepoRef`]s.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::StargazeError;

/// Source kind for GitHub-hosted entries.
const GITHUB_KIND: &str = "github";

/// A raw entry of the registry database.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryEntry {
    /// Hosting kind (`github`, `url`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Repository owner.
    #[serde(default)]
    pub owner: Option<String>,
    /// Repository name.
    #[serde(default)]
    pub repo: Option<String>,
    /// Module description.
    #[serde(default)]
    pub desc: Option<String>,
    /// Sub-directory of the module inside the repository.
    #[serde(default)]
    pub path: Option<String>,
}

/// A GitHub repository to fetch, with the module that points at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoRef {
    /// Module name in the registry.
    pub module: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
}

impl RepoRef {
    /// Returns the repository name in "owner/repo" format.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Parses the registry database into repository references.
///
/// Entries keep the order they appear in the document. Non-GitHub entries and entries without
/// an owner or repo are skipped.
///
/// # Errors
///
/// Returns `StargazeError::InvalidResponse` if the body is not a JSON object
/// of registry entries.
pub fn parse_entries(json: &str) -> crate::Result<Vec<RepoRef>> {
    let entries: IndexMap<String, RegistryEntry> =
        serde_json::from_str(json).map_err(StargazeError::InvalidResponse)?;
    let total = entries.len();

    let refs: Vec<RepoRef> = entries
        .into_iter()
        .filter(|(_, entry)| entry.kind == GITHUB_KIND)
        .filter_map(|(module, entry)| match (entry.owner, entry.repo) {
            (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
                Some(RepoRef { module, owner, repo })
            }
            _ => {
                debug!(module = %module, "Skipping GitHub entry without owner/repo");
                None
            }
        })
        .collect();

    debug!(total, github = refs.len(), "Parsed registry entries");
    Ok(refs)
}

/// Fetches the registry database and returns its GitHub entries.
///
/// # Errors
///
/// Returns `StargazeError::Registry` if the database cannot be downloaded,
/// or `StargazeError::InvalidResponse` if it cannot be parsed.
#[instrument(skip(client))]
pub async fn fetch_entries(client: &reqwest::Client, url: &str) -> crate::Result<Vec<RepoRef>> {
    debug!("Fetching registry database");
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(StargazeError::Registry {
            message: format!("GET {url} returned HTTP {}", status.as_u16()),
        });
    }

    let body = response.text().await?;
    parse_entries(&body)
}

/// Keeps the first `size` references, for quick manual runs.
#[must_use]
pub fn sample(mut refs: Vec<RepoRef>, size: usize) -> Vec<RepoRef> {
    refs.truncate(size);
    refs
}
