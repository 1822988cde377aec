//! Database operations for journal entries and tags.
//!
//! This module provides SQLite database operations for storing journal
//! entries and the tag vocabulary. It uses connection pooling via r2d2 for
//! efficient concurrent access.
//!
//! # Module Structure
//!
//! - `schema`: Table definitions and schema initialization
//! - `entries`: Entry CRUD and filtered query operations
//! - `filter`: Composable query criteria for entry lookups
//! - `tags`: Tag vocabulary operations
//!
//! # Example
//!
//! ```no_run
//! use daybook::db::Database;
//! use std::path::Path;
//!
//! let db_path = Path::new("/tmp/daybook.db");
//! let db = Database::open(db_path)?;
//! db.initialize_schema()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod entries;
pub mod filter;
pub mod schema;
pub mod tags;

use crate::errors::{AppResult, DatabaseError};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use tracing::{debug, info};

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Database handle with connection pooling.
///
/// The connection pool allows multiple concurrent read operations; SQLite
/// serializes writers itself, so the store adds no locking of its own.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens or creates the SQLite database at the given path.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the database file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Database file cannot be opened
    /// - Connection pool cannot be initialized
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening database at: {:?}", db_path);

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(5)
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        // Test the connection before handing the pool out
        let conn = pool.get().map_err(DatabaseError::Pool)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(DatabaseError::Sqlite)?;
        drop(conn);

        info!("Database opened successfully");
        Ok(Database { pool })
    }

    /// Opens an in-memory database, used by tests and ephemeral runs.
    ///
    /// The pool is capped at a single connection: each `:memory:` connection
    /// is its own database, so all users must share the one that created the
    /// schema. Callers must not hold a connection across a call that fetches
    /// its own.
    pub fn open_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(DatabaseError::Pool)?;
        Ok(Database { pool })
    }

    /// Gets a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the pool is exhausted.
    pub fn get_conn(&self) -> AppResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| DatabaseError::Pool(e).into())
    }

    /// Initializes the database schema and seeds the tag vocabulary.
    ///
    /// Creates all necessary tables and indexes if they don't exist.
    /// This is idempotent and safe to call multiple times.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation or tag seeding fails.
    pub fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        tags::seed_tags(&conn)?;
        info!("Database schema initialized");
        Ok(())
    }
}
