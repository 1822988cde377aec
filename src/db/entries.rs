//! Entry CRUD and query operations.
//!
//! This module provides functions for creating, reading, updating, deleting,
//! and querying journal entries in the database. One entry exists per
//! calendar day; the store assigns identities and timestamps.

use crate::db::filter::EntryFilter;
use crate::errors::{AppResult, DatabaseError};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use tracing::debug;

/// Represents a journal entry in the database.
///
/// `id` is 0 for an entry that has not been saved yet; the store assigns the
/// real identity on first save. `created_at` and `updated_at` are assigned by
/// the store and never taken from the caller.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: i64,
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
    pub primary_mood: String,
    pub secondary_moods: String,
    pub tags: String,
    pub category: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Entry {
    /// Creates an unsaved draft entry for the given date.
    pub fn draft(date: NaiveDate) -> Self {
        Entry {
            id: 0,
            date,
            title: String::new(),
            content: String::new(),
            primary_mood: String::new(),
            secondary_moods: String::new(),
            tags: String::new(),
            category: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }
}

const ENTRY_COLUMNS: &str =
    "id, date, title, content, primary_mood, secondary_moods, tags, category, created_at, updated_at";

/// Maps a SELECT row (in `ENTRY_COLUMNS` order) to an [`Entry`].
fn map_entry_row(row: &Row<'_>) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        date: NaiveDate::parse_from_str(&row.get::<_, String>(1)?, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?,
        title: row.get(2)?,
        content: row.get(3)?,
        primary_mood: row.get(4)?,
        secondary_moods: row.get(5)?,
        tags: row.get(6)?,
        category: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

/// Saves an entry: insert when it has no identity, update otherwise.
///
/// On insert, `created_at` and `updated_at` are both set to now and the new
/// identity is returned. On update, `created_at` is preserved, `updated_at`
/// refreshed, and the existing identity returned.
///
/// # Errors
///
/// Returns a `DatabaseError` if the write fails, including a constraint
/// violation when inserting a second entry for an already-used calendar day.
/// Updating an entry that no longer exists returns `DatabaseError::NotFound`.
pub fn save_entry(conn: &Connection, entry: &Entry) -> AppResult<i64> {
    if entry.id == 0 {
        debug!("Inserting entry for date {}", entry.date);

        conn.execute(
            r#"
            INSERT INTO entries (date, title, content, primary_mood, secondary_moods, tags, category, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            "#,
            params![
                entry.date.to_string(),
                entry.title,
                entry.content,
                entry.primary_mood,
                entry.secondary_moods,
                entry.tags,
                entry.category,
            ],
        )
        .map_err(DatabaseError::Sqlite)?;

        let id = conn.last_insert_rowid();
        debug!("Entry inserted with id {}", id);
        Ok(id)
    } else {
        debug!("Updating entry {} for date {}", entry.id, entry.date);

        let rows_affected = conn
            .execute(
                r#"
                UPDATE entries
                SET date = ?1, title = ?2, content = ?3, primary_mood = ?4,
                    secondary_moods = ?5, tags = ?6, category = ?7,
                    updated_at = CURRENT_TIMESTAMP
                WHERE id = ?8
                "#,
                params![
                    entry.date.to_string(),
                    entry.title,
                    entry.content,
                    entry.primary_mood,
                    entry.secondary_moods,
                    entry.tags,
                    entry.category,
                    entry.id,
                ],
            )
            .map_err(DatabaseError::Sqlite)?;

        if rows_affected == 0 {
            return Err(
                DatabaseError::NotFound(format!("Entry with id {} not found", entry.id)).into(),
            );
        }
        Ok(entry.id)
    }
}

/// Retrieves the entry for a calendar date.
///
/// # Errors
///
/// Returns an error if the database operation fails.
/// Returns `Ok(None)` if no entry exists for the given date.
pub fn get_entry_by_date(conn: &Connection, date: NaiveDate) -> AppResult<Option<Entry>> {
    debug!("Getting entry for date {}", date);

    let result = conn.query_row(
        &format!("SELECT {} FROM entries WHERE date = ?1", ENTRY_COLUMNS),
        params![date.to_string()],
        map_entry_row,
    );

    match result {
        Ok(entry) => Ok(Some(entry)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::Sqlite(e).into()),
    }
}

/// Deletes an entry by identity.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if no entry has the given id.
pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<()> {
    debug!("Deleting entry {}", id);

    let rows_affected = conn
        .execute("DELETE FROM entries WHERE id = ?1", params![id])
        .map_err(DatabaseError::Sqlite)?;

    if rows_affected == 0 {
        return Err(DatabaseError::NotFound(format!("Entry with id {} not found", id)).into());
    }
    Ok(())
}

/// Queries entries matching a filter, newest first, with pagination.
///
/// `skip` rows are passed over and at most `take` rows returned. `take == 0`
/// is a valid request for no rows, not an error.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn query_entries(
    conn: &Connection,
    filter: &EntryFilter,
    skip: usize,
    take: usize,
) -> AppResult<Vec<Entry>> {
    debug!("Querying entries (skip {}, take {})", skip, take);

    let (where_clause, mut sql_params) = filter.where_clause();
    let sql = format!(
        "SELECT {} FROM entries{} ORDER BY date DESC LIMIT ? OFFSET ?",
        ENTRY_COLUMNS, where_clause
    );
    sql_params.push(Value::Integer(take as i64));
    sql_params.push(Value::Integer(skip as i64));

    let mut stmt = conn.prepare(&sql).map_err(DatabaseError::Sqlite)?;
    let entries = stmt
        .query_map(params_from_iter(sql_params), map_entry_row)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    debug!("Query returned {} entries", entries.len());
    Ok(entries)
}

/// Counts entries matching a filter, without pagination.
///
/// Applies exactly the same predicates as [`query_entries`].
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn count_entries(conn: &Connection, filter: &EntryFilter) -> AppResult<usize> {
    let (where_clause, sql_params) = filter.where_clause();
    let sql = format!("SELECT COUNT(*) FROM entries{}", where_clause);

    let count: i64 = conn
        .query_row(&sql, params_from_iter(sql_params), |row| row.get(0))
        .map_err(DatabaseError::Sqlite)?;
    Ok(count as usize)
}

/// Returns every entry in the store, oldest first.
///
/// Used by the streak and dashboard analytics, which operate over the entire
/// entry history.
pub fn all_entries(conn: &Connection) -> AppResult<Vec<Entry>> {
    let sql = format!("SELECT {} FROM entries ORDER BY date ASC", ENTRY_COLUMNS);
    let mut stmt = conn.prepare(&sql).map_err(DatabaseError::Sqlite)?;
    let entries = stmt
        .query_map([], map_entry_row)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;
    Ok(entries)
}

/// Returns entries with dates inside the closed range `[start, end]`, oldest first.
pub fn entries_in_range(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<Entry>> {
    debug!("Fetching entries in range {}..={}", start, end);

    let sql = format!(
        "SELECT {} FROM entries WHERE date >= ?1 AND date <= ?2 ORDER BY date ASC",
        ENTRY_COLUMNS
    );
    let mut stmt = conn.prepare(&sql).map_err(DatabaseError::Sqlite)?;
    let entries = stmt
        .query_map(
            params![start.to_string(), end.to_string()],
            map_entry_row,
        )
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;
    Ok(entries)
}
