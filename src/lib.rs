/*!
# Daybook

Daybook is the data layer of a personal journaling application. It stores one
dated entry per calendar day with mood and tag metadata, answers filtered and
paginated queries over them, computes streak and dashboard analytics, and
renders a paginated text export.

## Core Features

- One entry per calendar day, with moods, tags, and a category
- Filtered, paginated entry queries with a matching total count
- Current/longest streak detection over the entry history
- Range-scoped dashboard aggregation: mood distribution, top tags,
  category breakdown, word-count trend, missed days
- Greedy word-wrap and page-break layout for fixed-page text export

## Architecture

The codebase follows a modular architecture with clear separation of concerns:

- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure
- `db`: SQLite entry store (entries, tags, filtered queries)
- `ops`: Analytics and export operations
- `layout`: Word-wrap and pagination engine
- `text`: Shared label codec and markup stripping

## Usage Example

```no_run
use daybook::db::Database;
use daybook::ops;
use chrono::NaiveDate;

fn main() -> daybook::errors::AppResult<()> {
    let db = Database::open(std::path::Path::new("/tmp/journal.db"))?;
    db.initialize_schema()?;

    let today = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
    let stats = ops::streak_stats(&db, today)?;
    println!("Current streak: {}", stats.current_streak);
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// SQLite entry store: entries, tags, filtered queries
pub mod db;
/// Error types and utilities for error handling
pub mod errors;
/// Word-wrap and pagination engine for export
pub mod layout;
/// Analytics and export operations
pub mod ops;
/// Shared label codec, markup stripping, and word counting
pub mod text;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use db::Database;
pub use errors::{AppError, AppResult};
