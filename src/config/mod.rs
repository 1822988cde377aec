//! Configuration management for the daybook application.
//!
//! This module handles loading and validating configuration settings from
//! environment variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `DAYBOOK_DB`: Path to the journal database file (defaults to
//!   ~/.daybook/journal.db)
//! - `HOME`: Used for expanding the default database path

use crate::errors::{AppError, AppResult};
use std::env;
use std::path::PathBuf;

/// Default database location under the user's home directory.
const DEFAULT_DB_SUBPATH: &str = ".daybook/journal.db";

/// Configuration for the daybook application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use daybook::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     db_path: PathBuf::from("/path/to/journal.db"),
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Path to the SQLite database file holding entries and tags.
    ///
    /// Loaded from the DAYBOOK_DB environment variable with a fallback to
    /// ~/.daybook/journal.db.
    pub db_path: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The database path is expanded with `shellexpand` so `~` and
    /// environment variable references resolve.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if path expansion fails or the resulting
    /// path is empty.
    pub fn load() -> AppResult<Self> {
        let db_path_str = env::var("DAYBOOK_DB").unwrap_or_else(|_| {
            let home = env::var("HOME").unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DB_SUBPATH)
        });

        let expanded = shellexpand::full(&db_path_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        let db_path = PathBuf::from(expanded.into_owned());

        if db_path.as_os_str().is_empty() {
            return Err(AppError::Config("Database path is empty".to_string()));
        }

        Ok(Config { db_path })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the database path is empty or relative.
    pub fn validate(&self) -> AppResult<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(AppError::Config("Database path is empty".to_string()));
        }
        if !self.db_path.is_absolute() {
            return Err(AppError::Config(
                "Database path must be an absolute path".to_string(),
            ));
        }
        Ok(())
    }

    /// Ensures the parent directory of the database file exists.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn ensure_db_directory(&self) -> AppResult<()> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
