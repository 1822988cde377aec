//! Tag vocabulary operations.
//!
//! Tags form a flat vocabulary of unique names. A default vocabulary is
//! seeded once when the table is empty; additional tags may be added later.

use crate::errors::{AppResult, DatabaseError};
use rusqlite::{params, Connection};
use tracing::{debug, info};

/// A tag in the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// The default tag vocabulary, seeded on first run.
pub const DEFAULT_TAGS: &[&str] = &[
    "Music",
    "Finance",
    "Hobbies",
    "Reflection",
    "Fitness",
    "Vacation",
    "Cooking",
    "Career",
    "Meditation",
    "Friends",
    "Planning",
    "Travel",
    "Self-care",
    "Projects",
    "Holiday",
    "Studies",
    "Nature",
    "Reading",
    "Exercise",
    "Relationships",
    "Birthday",
    "Personal Growth",
    "Shopping",
    "Work",
    "Spirituality",
    "Family",
    "Yoga",
    "Celebration",
    "Parenting",
    "Writing",
    "Health",
];

/// Seeds the default tag vocabulary if the table is empty.
///
/// Idempotent: a non-empty table is left untouched.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn seed_tags(conn: &Connection) -> AppResult<()> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM tags", [], |row| row.get(0))
        .map_err(DatabaseError::Sqlite)?;

    if count > 0 {
        debug!("Tag vocabulary already seeded ({} tags)", count);
        return Ok(());
    }

    for name in DEFAULT_TAGS {
        conn.execute("INSERT INTO tags (name) VALUES (?1)", params![name])
            .map_err(DatabaseError::Sqlite)?;
    }

    info!("Seeded {} default tags", DEFAULT_TAGS.len());
    Ok(())
}

/// Lists all tags in the vocabulary, ordered by name.
pub fn list_tags(conn: &Connection) -> AppResult<Vec<Tag>> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM tags ORDER BY name ASC")
        .map_err(DatabaseError::Sqlite)?;
    let tags = stmt
        .query_map([], |row| {
            Ok(Tag {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;
    Ok(tags)
}

/// Adds a tag to the vocabulary and returns its identity.
///
/// # Errors
///
/// Returns a `DatabaseError` if the name already exists (names are unique) or
/// the write fails.
pub fn save_tag(conn: &Connection, name: &str) -> AppResult<i64> {
    debug!("Saving tag '{}'", name);

    conn.execute("INSERT INTO tags (name) VALUES (?1)", params![name])
        .map_err(DatabaseError::Sqlite)?;
    Ok(conn.last_insert_rowid())
}
