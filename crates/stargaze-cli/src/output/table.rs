// SPDX-License-Identifier: Apache-2.0

//! Console table rendering.

use std::io::{self, Write};

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use console::style;
use stargaze_core::Repository;
use stargaze_core::utils::{format_relative_time, single_line, truncate};

/// Longest description shown in a table cell.
const DESCRIPTION_WIDTH: usize = 60;

fn build_table(repos: &[Repository]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "#",
            "Repository",
            "Stars",
            "Language",
            "Last push",
            "Description",
        ]);

    for (i, repo) in repos.iter().enumerate() {
        let last_push = repo
            .pushed_at
            .as_ref()
            .map_or_else(|| "-".to_string(), format_relative_time);
        let description = repo
            .description
            .as_deref()
            .map(|d| truncate(&single_line(d), DESCRIPTION_WIDTH))
            .unwrap_or_default();

        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            Cell::new(&repo.full_name),
            Cell::new(repo.stargazers_count).set_alignment(CellAlignment::Right),
            Cell::new(repo.language.as_deref().unwrap_or("-")),
            Cell::new(last_push),
            Cell::new(description),
        ]);
    }

    table
}

/// Writes the ranking as a console table.
pub fn write_table(w: &mut dyn Write, repos: &[Repository]) -> io::Result<()> {
    if repos.is_empty() {
        return writeln!(w, "{}", style("No repositories to rank.").dim());
    }
    writeln!(w, "{}", build_table(repos))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use stargaze_core::Owner;

    use super::*;

    fn repo(full_name: &str, stars: u64) -> Repository {
        let (owner, name) = full_name.split_once('/').unwrap();
        Repository {
            name: name.to_string(),
            full_name: full_name.to_string(),
            owner: Owner {
                login: owner.to_string(),
            },
            html_url: format!("https://github.com/{full_name}"),
            description: Some("HTTP\tmiddleware\nframework".to_string()),
            language: Some("TypeScript".to_string()),
            stargazers_count: stars,
            forks_count: 0,
            open_issues_count: 0,
            archived: false,
            pushed_at: Some(Utc::now() - Duration::days(3)),
        }
    }

    fn render(repos: &[Repository]) -> String {
        let mut buf = Vec::new();
        write_table(&mut buf, repos).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_table_lists_rows_in_rank_order() {
        let output = render(&[repo("oakserver/oak", 5000), repo("denoland/std", 3000)]);

        assert!(output.contains("Repository"));
        assert!(output.contains("Last push"));
        let oak = output.find("oakserver/oak").unwrap();
        let std = output.find("denoland/std").unwrap();
        assert!(oak < std);
        assert!(output.contains("5000"));
        assert!(output.contains("3 days ago"));
    }

    #[test]
    fn test_table_flattens_description() {
        let output = render(&[repo("oakserver/oak", 1)]);
        assert!(output.contains("HTTP middleware framework"));
    }

    #[test]
    fn test_missing_fields_render_as_dash() {
        let mut bare = repo("someone/bare", 0);
        bare.language = None;
        bare.pushed_at = None;
        bare.description = None;

        let output = render(&[bare]);
        assert!(output.contains("someone/bare"));
        assert!(output.contains('-'));
    }

    #[test]
    fn test_empty_ranking() {
        assert!(render(&[]).contains("No repositories to rank."));
    }
}
