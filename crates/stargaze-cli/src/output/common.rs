// SPDX-License-Identifier: Apache-2.0

//! Common UX helpers shared by the renderers.

use std::io::Write;
use std::path::Path;

use console::style;
use stargaze_core::FetchSummary;

/// Display the fetch summary.
///
/// Shows "Fetched S/T repositories", the not-found and failed counts when
/// non-zero, how many repositories made it into the ranking, and the file
/// the ranking was written to.
///
/// # Errors
/// Returns error if write operation fails.
pub fn show_summary<W: Write + ?Sized>(
    w: &mut W,
    summary: &FetchSummary,
    ranked: usize,
    written: Option<&Path>,
) -> std::io::Result<()> {
    let fetched = format!("{}/{}", summary.succeeded, summary.total);
    let fetched = if summary.succeeded == summary.total {
        style(fetched).for_stderr().green().bold()
    } else {
        style(fetched).for_stderr().yellow().bold()
    };
    write!(w, "Fetched {fetched} repositories")?;

    let mut problems = Vec::new();
    if summary.not_found > 0 {
        problems.push(format!("{} not found", summary.not_found));
    }
    if summary.failed > 0 {
        problems.push(format!("{} failed", summary.failed));
    }
    if !problems.is_empty() {
        write!(w, " ({})", style(problems.join(", ")).for_stderr().red())?;
    }
    writeln!(w, ", ranked {ranked}")?;

    if let Some(path) = written {
        writeln!(
            w,
            "{} {}",
            style("Wrote").for_stderr().dim(),
            style(path.display()).for_stderr().cyan()
        )?;
    }
    Ok(())
}
