// SPDX-License-Identifier: Apache-2.0

//! Repository metadata as returned by `GET /repos/{owner}/{repo}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Login name of the user or organization.
    pub login: String,
}

/// A fetched repository record.
///
/// Only the fields used for ranking and rendering are kept; unknown fields in
/// the API response are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name.
    pub name: String,
    /// Repository name in "owner/name" format.
    pub full_name: String,
    /// Repository owner.
    pub owner: Owner,
    /// Web URL.
    pub html_url: String,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
    /// Primary programming language.
    #[serde(default)]
    pub language: Option<String>,
    /// Star count.
    #[serde(default)]
    pub stargazers_count: u64,
    /// Fork count.
    #[serde(default)]
    pub forks_count: u64,
    /// Open issue count.
    #[serde(default)]
    pub open_issues_count: u64,
    /// Whether the repository is archived.
    #[serde(default)]
    pub archived: bool,
    /// Last push time.
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
}

impl Repository {
    /// A record is usable only if it has a name.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.full_name.is_empty()
    }
}
