// SPDX-License-Identifier: Apache-2.0

//! Error types for Stargaze.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.
//! Per-task failures travel inside [`crate::scheduler::Outcome::Failure`] as
//! `anyhow::Error` and can be downcast back to [`StargazeError`].

use thiserror::Error;

/// Errors that can occur during Stargaze operations.
#[derive(Error, Debug)]
pub enum StargazeError {
    /// Scheduler invoked with a concurrency limit below one.
    #[error("Invalid concurrency limit {limit}: must be a positive integer")]
    InvalidLimit {
        /// The rejected limit.
        limit: i64,
    },

    /// Repository does not exist or is not visible with the given credentials.
    #[error("Repository {owner}/{repo} not found")]
    NotFound {
        /// Repository owner.
        owner: String,
        /// Repository name.
        repo: String,
    },

    /// GitHub API returned a non-success status.
    #[error("GitHub API error (HTTP {status}): {message}")]
    GitHub {
        /// Error message, taken from the API body when available.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// Module registry listing could not be loaded.
    #[error("Registry error: {message}")]
    Registry {
        /// Error message.
        message: String,
    },

    /// No credentials were found in any source.
    #[error(
        "Authentication required - pass --username and --password, or set GITHUB_TOKEN environment variable"
    )]
    NotAuthenticated,

    /// Configuration file error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Response body could not be decoded.
    #[error("Invalid JSON response")]
    InvalidResponse(#[source] serde_json::Error),

    /// Network/HTTP error from reqwest.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl From<config::ConfigError> for StargazeError {
    fn from(err: config::ConfigError) -> Self {
        StargazeError::Config {
            message: err.to_string(),
        }
    }
}

impl StargazeError {
    /// Returns `true` if this error means the repository is legitimately absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, StargazeError::NotFound { .. })
    }
}
