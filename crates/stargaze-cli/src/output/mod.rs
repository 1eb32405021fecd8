// SPDX-License-Identifier: Apache-2.0

//! Output rendering for CLI commands.
//!
//! Command handlers return data; this module handles presentation. Table,
//! JSON and YAML go to stdout, TSV and Markdown are written to files, and the
//! run summary goes to stderr.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use stargaze_core::OutputConfig;

use crate::cli::{OutputContext, OutputFormat};
use crate::commands::types::RankResult;

pub mod common;
mod markdown;
mod table;
mod tsv;

/// Renders a ranking in the format selected on the command line.
pub fn render_rank(result: &RankResult, ctx: &OutputContext, paths: &OutputConfig) -> Result<()> {
    let repos = &result.repositories;
    let written: Option<PathBuf> = match ctx.format {
        OutputFormat::Table => {
            let mut stdout = io::stdout().lock();
            table::write_table(&mut stdout, repos).context("Failed to render table")?;
            None
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(repos).context("Failed to serialize to JSON")?;
            println!("{json}");
            None
        }
        OutputFormat::Yaml => {
            let yaml = serde_saphyr::to_string(repos).context("Failed to serialize to YAML")?;
            println!("{yaml}");
            None
        }
        OutputFormat::Tsv => {
            write_file(&paths.tsv_path, |w| tsv::write_tsv(w, repos))?;
            Some(paths.tsv_path.clone())
        }
        OutputFormat::Markdown => {
            let generated_at = Utc::now();
            write_file(&paths.markdown_path, |w| {
                markdown::write_markdown(w, repos, &generated_at)
            })?;
            Some(paths.markdown_path.clone())
        }
    };

    if !ctx.quiet {
        let mut stderr = io::stderr().lock();
        common::show_summary(&mut stderr, &result.summary, repos.len(), written.as_deref())
            .context("Failed to print summary")?;
    }
    Ok(())
}

/// Creates `path` (and its parent directories) and fills it with `render`.
fn write_file<F>(path: &Path, render: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    render(&mut writer).with_context(|| format!("Failed to write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_file_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("stars.tsv");

        write_file(&path, |w| writeln!(w, "hello")).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_write_file_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a file
        let err = write_file(dir.path(), |w| writeln!(w, "hello")).unwrap_err();

        assert!(format!("{err:#}").contains("Failed to create"));
    }
}
