// SPDX-License-Identifier: Apache-2.0

//! Tab-separated output.

use std::io::{self, Write};

use stargaze_core::Repository;
use stargaze_core::utils::single_line;

const HEADER: [&str; 6] = ["rank", "full_name", "stars", "language", "url", "description"];

/// Writes one header line and one line per repository, in rank order.
pub fn write_tsv(w: &mut dyn Write, repos: &[Repository]) -> io::Result<()> {
    writeln!(w, "{}", HEADER.join("\t"))?;
    for (i, repo) in repos.iter().enumerate() {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}",
            i + 1,
            single_line(&repo.full_name),
            repo.stargazers_count,
            single_line(repo.language.as_deref().unwrap_or_default()),
            repo.html_url,
            single_line(repo.description.as_deref().unwrap_or_default()),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use stargaze_core::Owner;

    use super::*;

    fn repo(full_name: &str, stars: u64, description: Option<&str>) -> Repository {
        Repository {
            name: full_name.rsplit('/').next().unwrap().to_string(),
            full_name: full_name.to_string(),
            owner: Owner {
                login: full_name.split('/').next().unwrap().to_string(),
            },
            html_url: format!("https://github.com/{full_name}"),
            description: description.map(str::to_string),
            language: None,
            stargazers_count: stars,
            forks_count: 0,
            open_issues_count: 0,
            archived: false,
            pushed_at: None,
        }
    }

    #[test]
    fn test_tsv_rows() {
        let repos = vec![
            repo("oakserver/oak", 5000, Some("Middleware\tframework\nfor Deno")),
            repo("denoland/std", 3000, None),
        ];
        let mut buf = Vec::new();
        write_tsv(&mut buf, &repos).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "rank\tfull_name\tstars\tlanguage\turl\tdescription");
        assert_eq!(
            lines[1],
            "1\toakserver/oak\t5000\t\thttps://github.com/oakserver/oak\tMiddleware framework for Deno"
        );
        assert_eq!(lines[2], "2\tdenoland/std\t3000\t\thttps://github.com/denoland/std\t");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_every_row_has_six_columns() {
        let repos = vec![repo("a/b", 1, Some("tabs\there\tand\tthere"))];
        let mut buf = Vec::new();
        write_tsv(&mut buf, &repos).unwrap();
        let output = String::from_utf8(buf).unwrap();

        for line in output.lines() {
            assert_eq!(line.split('\t').count(), 6, "line: {line}");
        }
    }
}
