// SPDX-License-Identifier: Apache-2.0

//! Markdown report output.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use stargaze_core::Repository;
use stargaze_core::utils::single_line;

/// Makes free text safe inside a pipe-table cell.
fn escape_cell(text: &str) -> String {
    single_line(text).replace('|', "\\|")
}

/// Like [`escape_cell`], also escaping the brackets that close link text.
fn escape_link_text(text: &str) -> String {
    escape_cell(text).replace('[', "\\[").replace(']', "\\]")
}

/// Writes a titled report with the ranking as a pipe table.
pub fn write_markdown(
    w: &mut dyn Write,
    repos: &[Repository],
    generated_at: &DateTime<Utc>,
) -> io::Result<()> {
    writeln!(w, "# Repositories by stars")?;
    writeln!(w)?;
    writeln!(
        w,
        "_Generated {} from {} repositories._",
        generated_at.format("%Y-%m-%d %H:%M UTC"),
        repos.len()
    )?;
    writeln!(w)?;
    writeln!(w, "| # | Repository | Stars | Language | Description |")?;
    writeln!(w, "| ---: | --- | ---: | --- | --- |")?;

    for (i, repo) in repos.iter().enumerate() {
        writeln!(
            w,
            "| {} | [{}]({}) | {} | {} | {} |",
            i + 1,
            escape_link_text(&repo.full_name),
            repo.html_url,
            repo.stargazers_count,
            escape_cell(repo.language.as_deref().unwrap_or_default()),
            escape_cell(repo.description.as_deref().unwrap_or_default()),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use stargaze_core::Owner;

    use super::*;

    #[test]
    fn test_markdown_report() {
        let repos = vec![Repository {
            name: "oak".to_string(),
            full_name: "oakserver/oak".to_string(),
            owner: Owner {
                login: "oakserver".to_string(),
            },
            html_url: "https://github.com/oakserver/oak".to_string(),
            description: Some("Routing | middleware\nfor Deno".to_string()),
            language: Some("TypeScript".to_string()),
            stargazers_count: 5000,
            forks_count: 0,
            open_issues_count: 0,
            archived: false,
            pushed_at: None,
        }];
        let generated_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();

        let mut buf = Vec::new();
        write_markdown(&mut buf, &repos, &generated_at).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert!(output.starts_with("# Repositories by stars\n"));
        assert!(output.contains("_Generated 2024-05-01 12:30 UTC from 1 repositories._"));
        assert!(output.contains(
            "| 1 | [oakserver/oak](https://github.com/oakserver/oak) | 5000 | TypeScript | Routing \\| middleware for Deno |"
        ));
    }

    #[test]
    fn test_brackets_in_link_text_are_escaped() {
        assert_eq!(escape_link_text("odd/[name]"), "odd/\\[name\\]");
        assert_eq!(escape_link_text("a|b/c"), "a\\|b/c");
        assert_eq!(escape_cell("[kept] in descriptions"), "[kept] in descriptions");
    }

    #[test]
    fn test_empty_report_has_table_header() {
        let generated_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut buf = Vec::new();
        write_markdown(&mut buf, &[], &generated_at).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert!(output.contains("| # | Repository | Stars | Language | Description |"));
        assert!(output.contains("from 0 repositories"));
    }
}
