// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # Stargaze Core
//!
//! Core library for Stargaze - ranks the GitHub repositories behind a module
//! registry by star count.
//!
//! This crate provides reusable components for:
//! - Bounded-concurrency task scheduling with per-task outcomes
//! - GitHub API integration (authenticated repository fetch)
//! - Module registry listing
//! - Sorting, deduplication and fetch summaries
//! - Configuration management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use stargaze_core::{Credentials, GitHubClient, load_config, pipeline, registry, scheduler};
//! use anyhow::Result;
//!
//! # async fn example(credentials: Credentials) -> Result<()> {
//! let config = load_config()?;
//! let client = Arc::new(GitHubClient::new(&config.github, credentials)?);
//!
//! let refs = registry::fetch_entries(client.http(), &config.registry.url).await?;
//! let tasks = stargaze_core::github::repository_tasks(&client, &refs);
//! let outcomes = scheduler::run(tasks, config.fetch.concurrency).await?;
//!
//! for repo in pipeline::rank(pipeline::successes(outcomes)) {
//!     println!("{} {}", repo.stargazers_count, repo.full_name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`scheduler`] - Bounded-concurrency task runner
//! - [`github`] - GitHub REST client and repository model
//! - [`registry`] - Module registry listing
//! - [`pipeline`] - Filtering, sorting, deduplication
//! - [`config`] - Configuration loading and paths
//! - [`auth`] - Credentials and providers
//! - [`utils`] - Text formatting helpers
//! - [`error`] - Error types

// ============================================================================
// Authentication
// ============================================================================

pub use auth::{Credentials, TokenProvider, TokenSource, resolve_token};

// ============================================================================
// Error Handling
// ============================================================================

pub use error::StargazeError;

/// Convenience Result type for Stargaze operations.
///
/// This is equivalent to `std::result::Result<T, StargazeError>`.
pub type Result<T> = std::result::Result<T, StargazeError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AppConfig, FetchConfig, GitHubConfig, OutputConfig, RegistryConfig, config_dir,
    config_file_path, load_config,
};

// ============================================================================
// Scheduling
// ============================================================================

pub use scheduler::{ConcurrencyLimit, Outcome, Task};

// ============================================================================
// GitHub Integration
// ============================================================================

pub use github::{GitHubClient, Owner, Repository, parse_owner_repo};

// ============================================================================
// Registry and Ranking
// ============================================================================

pub use pipeline::FetchSummary;
pub use registry::RepoRef;

// ============================================================================
// Modules
// ============================================================================

pub mod auth;
pub mod config;
pub mod error;
pub mod github;
pub mod pipeline;
pub mod registry;
pub mod scheduler;
pub mod utils;
