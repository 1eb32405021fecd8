// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Provides an authenticated REST client for repository metadata and turns a
//! list of [`RepoRef`]s into scheduler tasks.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::auth::Credentials;
use crate::config::GitHubConfig;
use crate::error::StargazeError;
use crate::registry::RepoRef;
use crate::scheduler::{self, Task};

pub mod repository;

pub use repository::{Owner, Repository};

/// REST API version pinned in every request.
const API_VERSION: &str = "2022-11-28";

/// Parses an owner/repo string to extract owner and repo.
///
/// Validates format: exactly one `/`, non-empty parts.
///
/// # Errors
///
/// Returns an error if the format is invalid.
pub fn parse_owner_repo(s: &str) -> anyhow::Result<(String, String)> {
    let parts: Vec<&str> = s.trim().split('/').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        anyhow::bail!(
            "Invalid owner/repo format.\n\
             Expected: owner/repo\n\
             Got: {s}"
        );
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}

/// Error body returned by the GitHub API.
#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

/// Authenticated GitHub REST client.
///
/// Cheap to share behind an `Arc`; the inner `reqwest::Client` pools
/// connections across all concurrent requests.
#[derive(Debug)]
pub struct GitHubClient {
    /// HTTP client with timeout, user agent and default headers.
    http: Client,
    /// API base URL without trailing slash.
    api_url: String,
    /// Credentials applied to every request.
    credentials: Credentials,
}

impl GitHubClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `StargazeError::Network` if the HTTP client cannot be built.
    pub fn new(config: &GitHubConfig, credentials: Credentials) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );

        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.api_timeout_seconds))
            .default_headers(headers)
            .build()?;

        debug!(api_url = %config.api_url, scheme = credentials.scheme(), "Created GitHub client");

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Returns the underlying HTTP client, for unauthenticated requests
    /// such as the registry download.
    #[must_use]
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Returns the API URL of a repository.
    #[must_use]
    pub fn repo_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{owner}/{repo}", self.api_url)
    }

    /// Fetches metadata for a single repository.
    ///
    /// # Errors
    ///
    /// - `StargazeError::NotFound` on HTTP 404
    /// - `StargazeError::GitHub` on any other non-success status
    /// - `StargazeError::InvalidResponse` if the body is not a repository
    /// - `StargazeError::Network` on transport failure or timeout
    #[instrument(skip(self))]
    pub async fn fetch_repository(&self, owner: &str, repo: &str) -> crate::Result<Repository> {
        let url = self.repo_url(owner, repo);
        let response = self.credentials.apply(self.http.get(&url)).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(StargazeError::NotFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
            });
        }

        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiMessage>(&body).map_or_else(
                |_| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                },
                |api| api.message,
            );
            return Err(StargazeError::GitHub {
                message,
                status: status.as_u16(),
            });
        }

        let repository: Repository =
            serde_json::from_str(&body).map_err(StargazeError::InvalidResponse)?;
        debug!(stars = repository.stargazers_count, "Fetched repository");
        Ok(repository)
    }
}

/// Builds one fetch task per repository reference, in the same order.
#[must_use]
pub fn repository_tasks(client: &Arc<GitHubClient>, refs: &[RepoRef]) -> Vec<Task<Repository>> {
    refs.iter()
        .map(|repo_ref| {
            let client = Arc::clone(client);
            let owner = repo_ref.owner.clone();
            let repo = repo_ref.repo.clone();
            scheduler::task(move || async move {
                let repository = client.fetch_repository(&owner, &repo).await?;
                Ok(repository)
            })
        })
        .collect()
}
