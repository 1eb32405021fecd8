// SPDX-License-Identifier: Apache-2.0

//! Post-processing of scheduler outcomes.
//!
//! Filters failures out of the outcome sequence, sorts what remains in
//! descending order and drops duplicates, keeping the highest-ranked copy.

use std::collections::HashSet;
use std::hash::Hash;

use serde::Serialize;
use tracing::{Level, debug, warn};

use crate::error::StargazeError;
use crate::github::Repository;
use crate::scheduler::Outcome;

/// Counts of what happened to a batch of fetches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FetchSummary {
    /// Number of tasks scheduled.
    pub total: usize,
    /// Number of tasks that produced a value.
    pub succeeded: usize,
    /// Failures caused by the repository being absent (HTTP 404).
    pub not_found: usize,
    /// All other failures.
    pub failed: usize,
}

impl FetchSummary {
    /// Tallies an outcome sequence without consuming it.
    #[must_use]
    pub fn from_outcomes<T>(outcomes: &[Outcome<T>]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };

        for outcome in outcomes {
            match outcome.failure() {
                None => summary.succeeded += 1,
                Some(err) if is_not_found(err) => summary.not_found += 1,
                Some(_) => summary.failed += 1,
            }
        }

        summary
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<StargazeError>()
        .is_some_and(StargazeError::is_not_found)
}

/// Level at which a dropped outcome is logged. Missing repositories are
/// routine in a registry run and stay at debug.
fn failure_level(err: &anyhow::Error) -> Level {
    if is_not_found(err) {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Keeps successful values in input order, logging each failure with its slot.
pub fn successes<T>(outcomes: Vec<Outcome<T>>) -> Vec<T> {
    outcomes
        .into_iter()
        .enumerate()
        .filter_map(|(index, outcome)| match outcome {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(err) => {
                if failure_level(&err) == Level::DEBUG {
                    debug!(index, error = %err, "Dropping missing repository");
                } else {
                    warn!(index, error = %err, "Dropping failed fetch");
                }
                None
            }
        })
        .collect()
}

/// Stable sort in descending order of `key`.
///
/// Elements with equal keys keep their relative input order.
pub fn sort_by_desc<T, K, F>(items: &mut [T], mut key: F)
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

/// Removes later duplicates, keeping the first occurrence of each key.
pub fn dedup_by_key<T, K, F>(items: Vec<T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}

/// Ranks fetched repositories: drops invalid records, sorts by stars
/// descending, then removes repeated repositories.
///
/// Several registry modules can live in one repository, so duplicates are
/// keyed on `full_name`.
#[must_use]
pub fn rank(repositories: Vec<Repository>) -> Vec<Repository> {
    let fetched = repositories.len();
    let mut valid: Vec<Repository> = repositories
        .into_iter()
        .filter(Repository::is_valid)
        .collect();

    sort_by_desc(&mut valid, |repo| repo.stargazers_count);
    let ranked = dedup_by_key(valid, |repo| repo.full_name.to_lowercase());

    debug!(fetched, ranked = ranked.len(), "Ranked repositories");
    ranked
}
