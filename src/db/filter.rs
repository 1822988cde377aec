//! Composable query criteria for entry lookups.
//!
//! An [`EntryFilter`] carries the optional criteria of a filtered entry query:
//! free-text search, an exact calendar date, a mood label, and a tag label.
//! All criteria are conjunctive. Blank criteria (empty or whitespace-only
//! strings) are dropped at construction time so they never reach the SQL
//! layer as degenerate predicates.
//!
//! The filter renders to one WHERE fragment plus its parameter list, consumed
//! identically by [`crate::db::entries::query_entries`] and
//! [`crate::db::entries::count_entries`].

use chrono::NaiveDate;
use rusqlite::types::Value;

/// Optional, conjunctive criteria for querying journal entries.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Substring matched against title or content (collaborator LIKE semantics).
    pub search_text: Option<String>,
    /// Exact calendar date; the same day-granularity rule entry uniqueness uses.
    pub date: Option<NaiveDate>,
    /// Mood label matching the primary mood or contained in the secondary moods.
    pub mood: Option<String>,
    /// Tag label contained in the entry's tag list.
    pub tag: Option<String>,
}

/// Normalizes an optional criterion: blank and whitespace-only become `None`.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl EntryFilter {
    /// Builds a filter from raw optional criteria, dropping blank strings.
    pub fn new(
        search_text: Option<&str>,
        date: Option<NaiveDate>,
        mood: Option<&str>,
        tag: Option<&str>,
    ) -> Self {
        EntryFilter {
            search_text: non_blank(search_text),
            date,
            mood: non_blank(mood),
            tag: non_blank(tag),
        }
    }

    /// True when no criterion is set; the query is then unfiltered.
    pub fn is_empty(&self) -> bool {
        self.search_text.is_none() && self.date.is_none() && self.mood.is_none() && self.tag.is_none()
    }

    /// Renders the filter as a SQL fragment and its positional parameters.
    ///
    /// Returns an empty fragment when no criterion is set. The fragment starts
    /// with ` WHERE ` when non-empty, so callers append it verbatim.
    pub(crate) fn where_clause(&self) -> (String, Vec<Value>) {
        let mut conditions: Vec<&str> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if let Some(text) = &self.search_text {
            conditions.push("(title LIKE ? OR content LIKE ?)");
            let pattern = format!("%{}%", text);
            params.push(Value::Text(pattern.clone()));
            params.push(Value::Text(pattern));
        }

        if let Some(date) = &self.date {
            conditions.push("date = ?");
            params.push(Value::Text(date.to_string()));
        }

        if let Some(mood) = &self.mood {
            conditions.push("(primary_mood = ? OR secondary_moods LIKE ?)");
            params.push(Value::Text(mood.clone()));
            params.push(Value::Text(format!("%{}%", mood)));
        }

        if let Some(tag) = &self.tag {
            conditions.push("tags LIKE ?");
            params.push(Value::Text(format!("%{}%", tag)));
        }

        if conditions.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), params)
        }
    }
}
