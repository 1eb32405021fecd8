// SPDX-License-Identifier: Apache-2.0

//! Result types returned by command handlers.
//!
//! These types allow command handlers to return data instead of printing
//! directly, improving testability and separation of concerns.

use serde::Serialize;
use stargaze_core::{FetchSummary, Repository};

/// Result from the rank command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RankResult {
    /// Repositories sorted by stars, duplicates removed.
    pub repositories: Vec<Repository>,
    /// What happened to each fetch.
    pub summary: FetchSummary,
}
