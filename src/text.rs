//! Text utilities shared across querying, analytics, and export.
//!
//! Journal entries store rich text as markup and keep multi-valued fields
//! (secondary moods, tags) as comma-delimited strings. This module is the
//! single place that knows how to decode those representations: splitting
//! delimited label lists, stripping markup down to plain text, and counting
//! words.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a single markup tag, non-greedily, e.g. `<b>` or `</p>`.
static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Splits a comma-delimited label string into trimmed, non-empty labels.
///
/// Empty and whitespace-only segments are discarded, so `"Travel, Music,,  Work "`
/// yields `["Travel", "Music", "Work"]`.
///
/// # Examples
///
/// ```
/// use daybook::text::split_labels;
///
/// assert_eq!(split_labels("Travel, Music"), vec!["Travel", "Music"]);
/// assert!(split_labels("  ,, ").is_empty());
/// ```
pub fn split_labels(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .collect()
}

/// Joins labels back into the stored comma-delimited form.
pub fn join_labels<S: AsRef<str>>(labels: &[S]) -> String {
    labels
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Strips markup tags from rich-text content, returning plain text.
///
/// Any substring of the form `<...>` is removed. Entities are not decoded and
/// escaping is not interpreted; the stored content is trusted application
/// markup, not arbitrary HTML.
pub fn strip_markup(content: &str) -> String {
    MARKUP_TAG.replace_all(content, "").into_owned()
}

/// Counts words in rich-text content after stripping markup.
///
/// Words are maximal runs of non-whitespace characters. Blank content counts
/// as zero words.
pub fn count_words(content: &str) -> usize {
    if content.trim().is_empty() {
        return 0;
    }
    strip_markup(content).split_whitespace().count()
}
