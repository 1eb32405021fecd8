// SPDX-License-Identifier: Apache-2.0

//! Credential abstraction for GitHub API calls.
//!
//! This module defines [`Credentials`] and the [`TokenProvider`] trait, which
//! abstracts where credentials come from. The CLI resolves them from command
//! line flags, environment variables, or the GitHub CLI; tests supply them
//! directly.
//!
//! Token resolution priority chain ([`resolve_token`]):
//! 1. `GH_TOKEN` environment variable
//! 2. `GITHUB_TOKEN` environment variable
//! 3. GitHub CLI (`gh auth token`)

use std::fmt;
use std::process::Command;

use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, instrument};

/// Credentials attached to every GitHub request.
#[derive(Clone)]
pub enum Credentials {
    /// HTTP Basic authentication. A personal access token works as password.
    Basic {
        /// GitHub account name, without the leading `@`.
        username: String,
        /// Password or personal access token.
        password: SecretString,
    },
    /// Bearer token (`GH_TOKEN`, `GITHUB_TOKEN`, `gh auth token`).
    Token(SecretString),
}

impl Credentials {
    /// Applies these credentials to an outgoing request.
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Credentials::Basic { username, password } => {
                request.basic_auth(username, Some(password.expose_secret()))
            }
            Credentials::Token(token) => request.bearer_auth(token.expose_secret()),
        }
    }

    /// Short label for logs; never includes the secret.
    #[must_use]
    pub fn scheme(&self) -> &'static str {
        match self {
            Credentials::Basic { .. } => "basic",
            Credentials::Token(_) => "token",
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            Credentials::Token(_) => f.debug_tuple("Token").field(&"[REDACTED]").finish(),
        }
    }
}

/// Source of a resolved GitHub token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
    /// Token from `GH_TOKEN` or `GITHUB_TOKEN` environment variable.
    Environment,
    /// Token from `gh auth token` command.
    GhCli,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Environment => write!(f, "environment variable"),
            TokenSource::GhCli => write!(f, "GitHub CLI"),
        }
    }
}

/// Attempts to get a token from the GitHub CLI (`gh auth token`).
///
/// Returns `None` if `gh` is not installed, not authenticated, or fails.
#[instrument]
fn get_token_from_gh_cli() -> Option<SecretString> {
    debug!("Attempting to get token from gh CLI");

    match Command::new("gh").args(["auth", "token"]).output() {
        Ok(output) if output.status.success() => {
            let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if token.is_empty() {
                debug!("gh auth token returned empty output");
                None
            } else {
                Some(SecretString::from(token))
            }
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(
                status = ?output.status,
                stderr = %stderr.trim(),
                "gh auth token failed"
            );
            None
        }
        Err(e) => {
            debug!(error = %e, "Failed to execute gh command");
            None
        }
    }
}

/// Resolves a GitHub token using the priority chain.
///
/// Returns the token and its source, or `None` if no token is found.
#[instrument]
pub fn resolve_token() -> Option<(SecretString, TokenSource)> {
    for var in ["GH_TOKEN", "GITHUB_TOKEN"] {
        if let Ok(token) = std::env::var(var)
            && !token.is_empty()
        {
            debug!(var, "Using token from environment variable");
            return Some((SecretString::from(token), TokenSource::Environment));
        }
    }

    if let Some(token) = get_token_from_gh_cli() {
        debug!("Using token from GitHub CLI");
        return Some((token, TokenSource::GhCli));
    }

    debug!("No token found in any source");
    None
}

/// Provides GitHub credentials for API calls.
///
/// Implementations should return `None` if no credentials are available.
pub trait TokenProvider: Send + Sync {
    /// Retrieves credentials for the GitHub API.
    fn credentials(&self) -> Option<Credentials>;
}
