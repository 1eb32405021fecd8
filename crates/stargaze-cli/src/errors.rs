// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `StargazeError` and adds hints for the error
//! kinds a user can act on. Other errors are printed with their context chain.

use anyhow::Error;
use stargaze_core::error::StargazeError;

/// Formats an error for CLI display with helpful hints.
pub fn format_error(error: &Error) -> String {
    let Some(err) = error.downcast_ref::<StargazeError>() else {
        return format!("{error:#}");
    };

    match err {
        StargazeError::InvalidLimit { .. } => {
            format!("{err}\n\nTip: Pass a positive value with --concurrency, e.g. --concurrency 20.")
        }
        StargazeError::NotAuthenticated => format!(
            "{err}\n\nTip: Run with --username <name> --password <token>, or export GITHUB_TOKEN."
        ),
        StargazeError::Config { .. } => format!(
            "{err}\n\nTip: Check your config file at {}",
            stargaze_core::config::config_file_path().display()
        ),
        StargazeError::Registry { .. } | StargazeError::InvalidResponse(_) => format!(
            "{err}\n\nTip: Check the registry URL (--registry) or pass repositories as OWNER/REPO arguments."
        ),
        StargazeError::Network(_) => {
            format!("{err}\n\nTip: Check your internet connection and try again.")
        }
        StargazeError::GitHub { status: 401, .. } => {
            format!("{err}\n\nTip: Check your GitHub credentials.")
        }
        StargazeError::GitHub { .. } | StargazeError::NotFound { .. } => err.to_string(),
    }
}
