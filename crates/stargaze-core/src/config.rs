// SPDX-License-Identifier: Apache-2.0

//! Configuration management for Stargaze.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `STARGAZE_`)
//! 2. Config file: `~/.config/stargaze/config.toml`
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Lower the fan-out via environment variable
//! STARGAZE_FETCH__CONCURRENCY=20 stargaze -f table
//! ```

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::StargazeError;

/// Default deno.land/x module database.
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/denoland/deno_website2/main/database.json";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// GitHub API settings.
    pub github: GitHubConfig,
    /// Module registry settings.
    pub registry: RegistryConfig,
    /// Fetch scheduling settings.
    pub fetch: FetchConfig,
    /// Output file locations.
    pub output: OutputConfig,
}

/// GitHub API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Base URL of the REST API.
    pub api_url: String,
    /// API request timeout in seconds.
    pub api_timeout_seconds: u64,
    /// User agent sent with every request (GitHub rejects requests without one).
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            api_timeout_seconds: 10,
            user_agent: concat!("stargaze/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Module registry settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// URL of the registry database JSON.
    pub url: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.to_string(),
        }
    }
}

/// Fetch scheduling settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Maximum number of repository requests in flight.
    ///
    /// Signed so that a bad value surfaces as `InvalidLimit` instead of a parse error.
    pub concurrency: i64,
    /// Number of entries fetched in sampling mode.
    pub sample_size: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency: 100,
            sample_size: 4,
        }
    }
}

/// Output file locations.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the generated TSV file.
    pub tsv_path: PathBuf,
    /// Path of the generated Markdown file.
    pub markdown_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            tsv_path: PathBuf::from("stargaze.tsv"),
            markdown_path: PathBuf::from("stargaze.md"),
        }
    }
}

/// Returns the Stargaze configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/stargaze`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("stargaze");
    }
    dirs::home_dir()
        .expect("Could not determine home directory - is HOME set?")
        .join(".config")
        .join("stargaze")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration.
///
/// Loads from config file (if exists) and environment variables.
/// Environment variables use the prefix `STARGAZE_` and double underscore
/// for nested keys (e.g., `STARGAZE_GITHUB__API_URL`).
///
/// # Errors
///
/// Returns `StargazeError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, StargazeError> {
    let config_path = config_file_path();

    let config = Config::builder()
        // Load from config file (optional - may not exist)
        .add_source(File::with_name(config_path.to_string_lossy().as_ref()).required(false))
        // Override with environment variables
        .add_source(
            Environment::with_prefix("STARGAZE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}
