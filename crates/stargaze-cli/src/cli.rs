// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for Stargaze.
//!
//! Uses clap's derive API for declarative CLI parsing.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output format for the ranking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Console table (default)
    #[default]
    Table,
    /// Tab-separated values file
    Tsv,
    /// Markdown file
    Markdown,
    /// JSON on stdout for programmatic consumption
    Json,
    /// YAML on stdout for programmatic consumption
    Yaml,
}

impl OutputFormat {
    /// Returns true if this format writes a file instead of stdout.
    pub fn writes_file(self) -> bool {
        matches!(self, OutputFormat::Tsv | OutputFormat::Markdown)
    }
}

/// Global output configuration passed to commands.
#[derive(Clone)]
pub struct OutputContext {
    /// Output format
    pub format: OutputFormat,
    /// Suppress non-essential output (spinners, progress, summary)
    pub quiet: bool,
    /// Whether stderr is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, quiet: bool) -> Self {
        Self {
            format,
            quiet,
            is_tty: std::io::stderr().is_terminal(),
        }
    }

    /// Returns true if interactive elements (spinners, progress bars) should be shown.
    ///
    /// Progress goes to stderr, so structured stdout formats stay clean.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && !self.quiet
    }
}

/// Stargaze - rank registry modules by the GitHub stars of their repositories.
///
/// Lists the GitHub-hosted modules of a registry (or the repositories given on
/// the command line), fetches each repository with bounded concurrency, and
/// prints them sorted by star count.
#[derive(Parser)]
#[command(name = "stargaze")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Repositories to rank instead of the registry (owner/repo)
    #[arg(value_name = "OWNER/REPO")]
    pub repos: Vec<String>,

    /// GitHub account username without '@' (requires --password)
    #[arg(long, short = 'u', requires = "password")]
    pub username: Option<String>,

    /// GitHub account password or personal access token (requires --username)
    #[arg(long, short = 'p', requires = "username")]
    pub password: Option<String>,

    /// Output format
    #[arg(long, short = 'f', default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// For testing, fetch only a small sample of the registry
    #[arg(long, short = 's', visible_alias = "test")]
    pub sampling: bool,

    /// Maximum number of concurrent GitHub requests
    #[arg(long, short = 'c', allow_negative_numbers = true)]
    pub concurrency: Option<i64>,

    /// Override the registry database URL
    #[arg(long)]
    pub registry: Option<String>,

    /// Output file for tsv/markdown formats
    #[arg(long, short = 'O')]
    pub out: Option<PathBuf>,

    /// Suppress non-essential output (progress, summary)
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Enable verbose output (debug-level logging)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_original_flags() {
        let cli = Cli::try_parse_from([
            "stargaze", "-u", "octocat", "-p", "secret", "-f", "tsv", "--test",
        ])
        .expect("valid arguments");

        assert_eq!(cli.username.as_deref(), Some("octocat"));
        assert_eq!(cli.password.as_deref(), Some("secret"));
        assert_eq!(cli.format, OutputFormat::Tsv);
        assert!(cli.sampling);
        assert!(cli.repos.is_empty());
    }

    #[test]
    fn test_username_requires_password() {
        let result = Cli::try_parse_from(["stargaze", "--username", "octocat"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_concurrency_reaches_validation() {
        let cli = Cli::try_parse_from(["stargaze", "-c", "-1"]).expect("parses");
        assert_eq!(cli.concurrency, Some(-1));
    }

    #[test]
    fn test_positional_repos() {
        let cli = Cli::try_parse_from(["stargaze", "denoland/std", "oakserver/oak"])
            .expect("parses");
        assert_eq!(cli.repos, vec!["denoland/std", "oakserver/oak"]);
        assert_eq!(cli.format, OutputFormat::Table);
    }
}
