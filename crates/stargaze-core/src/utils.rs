// SPDX-License-Identifier: Apache-2.0

//! Text utility functions for Stargaze.
//!
//! Provides reusable text formatting used by the renderers: truncation,
//! single-line flattening and relative time display.

use chrono::{DateTime, Utc};

/// Truncates text to a maximum length with default ellipsis suffix "...".
///
/// Uses character count (not byte count) to safely handle multi-byte UTF-8.
/// The suffix is included in the max length calculation.
///
/// # Examples
///
/// ```
/// use stargaze_core::utils::truncate;
///
/// assert_eq!(truncate("Hello", 10), "Hello");
///
/// let long = "A fast, minimal web framework for Deno with batteries included";
/// let result = truncate(long, 20);
/// assert!(result.ends_with("..."));
/// assert!(result.chars().count() <= 20);
/// ```
#[must_use]
pub fn truncate(text: &str, max_len: usize) -> String {
    const SUFFIX: &str = "...";
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let truncate_at = max_len.saturating_sub(SUFFIX.len());
    let truncated: String = text.chars().take(truncate_at).collect();
    format!("{truncated}{SUFFIX}")
}

/// Collapses tabs and line breaks into single spaces.
///
/// Repository descriptions are free text; tab- and line-oriented formats
/// need them on one line.
#[must_use]
pub fn single_line(text: &str) -> String {
    text.split(['\t', '\r', '\n'])
        .filter(|part| !part.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats a `DateTime<Utc>` as relative time (e.g., "3 days ago").
///
/// # Examples
///
/// ```
/// use chrono::{Utc, Duration};
/// use stargaze_core::utils::format_relative_time;
///
/// let now = Utc::now();
/// assert_eq!(format_relative_time(&now), "just now");
///
/// let yesterday = now - Duration::days(1);
/// assert_eq!(format_relative_time(&yesterday), "1 day ago");
/// ```
#[must_use]
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(*dt);
    let days = duration.num_days();

    let (count, unit) = if days >= 365 {
        (days / 365, "year")
    } else if days > 30 {
        (days / 30, "month")
    } else if days > 0 {
        (days, "day")
    } else if duration.num_hours() > 0 {
        (duration.num_hours(), "hour")
    } else {
        return "just now".to_string();
    };

    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
