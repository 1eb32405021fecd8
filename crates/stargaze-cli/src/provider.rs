// SPDX-License-Identifier: Apache-2.0

//! CLI-specific `TokenProvider` implementation.
//!
//! Explicit `--username`/`--password` flags win and produce HTTP Basic
//! credentials. Otherwise a token is resolved from `GH_TOKEN`,
//! `GITHUB_TOKEN`, or the GitHub CLI.

use secrecy::SecretString;
use stargaze_core::auth::{Credentials, TokenProvider, resolve_token};
use tracing::debug;

/// CLI implementation of `TokenProvider`.
pub struct CliTokenProvider {
    username: Option<String>,
    password: Option<SecretString>,
}

impl CliTokenProvider {
    /// Creates a provider from the command-line flags.
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self {
            username: username.filter(|u| !u.is_empty()),
            password: password.filter(|p| !p.is_empty()).map(SecretString::from),
        }
    }
}

impl TokenProvider for CliTokenProvider {
    fn credentials(&self) -> Option<Credentials> {
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            debug!("Using basic credentials from command line");
            return Some(Credentials::Basic {
                username: username.trim_start_matches('@').to_string(),
                password: password.clone(),
            });
        }

        if let Some((token, source)) = resolve_token() {
            debug!(%source, "Resolved GitHub token");
            Some(Credentials::Token(token))
        } else {
            debug!("No GitHub credentials found in CLI sources");
            None
        }
    }
}
