/*!
# Daybook - A Personal Journal

Daybook stores one journal entry per calendar day, with mood and tag
metadata, and answers filtered queries, streak and dashboard analytics, and
paginated text export over them.

This file contains the main application flow, coordinating the various
components to implement the journal functionality.

## Usage

```text
daybook <COMMAND>

Commands:
  add        Write or overwrite the entry for a date
  show       Show the entry for a date
  delete     Delete the entry for a date
  list       List entries matching optional filters, newest first
  tags       List the tag vocabulary, or add a tag to it
  streaks    Show current and longest journaling streaks
  dashboard  Show dashboard statistics for a date range
  export     Export a date range as a paginated text document
```

## Configuration

The application can be configured with the following environment variables:
- `DAYBOOK_DB`: Path to the journal database file (defaults to "~/.daybook/journal.db")
*/

use chrono::{Local, NaiveDate};
use clap::Parser;
use daybook::cli::{CliArgs, Command};
use daybook::config::Config;
use daybook::db::filter::EntryFilter;
use daybook::db::{entries, tags, Database};
use daybook::errors::{AppError, AppResult};
use daybook::ops;
use std::io::Write;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// The main entry point for the daybook application.
///
/// This function coordinates the overall application flow:
/// 1. Initializes logging
/// 2. Parses command-line arguments
/// 3. Loads and validates configuration
/// 4. Opens the entry store and initializes its schema
/// 5. Dispatches the requested command
///
/// # Errors
///
/// This function can return various types of errors, including:
/// - Configuration errors (missing or invalid configuration)
/// - I/O errors (file not found, permission denied, etc.)
/// - Database errors (failed reads or writes against the entry store)
fn main() -> AppResult<()> {
    // Obtain the current date once at the beginning; everything downstream
    // receives it as a parameter.
    let today = Local::now().date_naive();

    let args = CliArgs::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting daybook");
    debug!("CLI arguments: {:?}", args);

    let config = Config::load()?;
    config.validate()?;
    config.ensure_db_directory()?;
    debug!("Database path: {:?}", config.db_path);

    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;

    run_command(&db, args.command, today)
}

/// Dispatches a parsed command against the store.
fn run_command(db: &Database, command: Command, today: NaiveDate) -> AppResult<()> {
    match command {
        Command::Add {
            date,
            title,
            content,
            mood,
            secondary,
            tags: tag_list,
            category,
        } => {
            let conn = db.get_conn()?;
            // Reuse the existing identity when the day already has an entry,
            // so the save updates instead of violating date uniqueness.
            let mut entry = entries::get_entry_by_date(&conn, date)?
                .unwrap_or_else(|| entries::Entry::draft(date));
            entry.title = title;
            entry.content = content;
            entry.primary_mood = mood;
            entry.secondary_moods = secondary;
            entry.tags = tag_list;
            entry.category = category;

            let id = entries::save_entry(&conn, &entry)?;
            println!("Saved entry {} for {}", id, date);
        }

        Command::Show { date } => {
            let conn = db.get_conn()?;
            match entries::get_entry_by_date(&conn, date)? {
                Some(entry) => print_entry(&entry),
                None => println!("No entry for {}", date),
            }
        }

        Command::Delete { date } => {
            let conn = db.get_conn()?;
            match entries::get_entry_by_date(&conn, date)? {
                Some(entry) => {
                    entries::delete_entry(&conn, entry.id)?;
                    println!("Deleted entry for {}", date);
                }
                None => println!("No entry for {}", date),
            }
        }

        Command::List {
            search,
            date,
            mood,
            tag,
            page,
            page_size,
        } => {
            let conn = db.get_conn()?;
            let filter = EntryFilter::new(search.as_deref(), date, mood.as_deref(), tag.as_deref());
            let skip = page.saturating_sub(1) * page_size;
            let results = entries::query_entries(&conn, &filter, skip, page_size)?;
            let total = entries::count_entries(&conn, &filter)?;

            for entry in &results {
                let mood_note = if entry.primary_mood.is_empty() {
                    String::new()
                } else {
                    format!("  [{}]", entry.primary_mood)
                };
                println!("{}  {}{}", entry.date, entry.title, mood_note);
            }
            println!("Showing {} of {} entries", results.len(), total);
        }

        Command::Tags { add } => {
            let conn = db.get_conn()?;
            match add {
                Some(name) => {
                    let id = tags::save_tag(&conn, &name)?;
                    println!("Added tag {} ({})", name, id);
                }
                None => {
                    for tag in tags::list_tags(&conn)? {
                        println!("{}", tag.name);
                    }
                }
            }
        }

        Command::Streaks { json } => {
            let stats = ops::streak_stats(db, today)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&stats)
                        .map_err(|e| AppError::Journal(format!("JSON encoding failed: {}", e)))?
                );
            } else {
                println!("Current streak: {} days", stats.current_streak);
                println!("Longest streak: {} days", stats.longest_streak);
                println!("Total entries:  {}", stats.total_entries);
            }
        }

        Command::Dashboard { from, to, json } => {
            let stats = ops::dashboard_stats(db, from, to, today)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&stats)
                        .map_err(|e| AppError::Journal(format!("JSON encoding failed: {}", e)))?
                );
            } else {
                print_dashboard(&stats, from, to);
            }
        }

        Command::Export { from, to, output } => {
            let bytes = ops::export_range(db, from, to)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &bytes)?;
                    println!("Exported {} bytes to {}", bytes.len(), path.display());
                }
                None => {
                    std::io::stdout().write_all(&bytes)?;
                }
            }
        }
    }

    Ok(())
}

/// Prints a full entry to stdout.
fn print_entry(entry: &entries::Entry) {
    println!("{}  {}", entry.date, entry.title);
    if !entry.primary_mood.is_empty() {
        println!("Mood: {}", entry.primary_mood);
    }
    if !entry.secondary_moods.is_empty() {
        println!("Secondary: {}", entry.secondary_moods);
    }
    if !entry.tags.is_empty() {
        println!("Tags: {}", entry.tags);
    }
    if !entry.category.is_empty() {
        println!("Category: {}", entry.category);
    }
    if !entry.content.is_empty() {
        println!();
        println!("{}", daybook::text::strip_markup(&entry.content));
    }
}

/// Prints dashboard statistics as readable text.
fn print_dashboard(stats: &ops::DashboardStats, from: NaiveDate, to: NaiveDate) {
    println!("Dashboard for {} to {}", from, to);
    println!("Total entries:  {}", stats.total_entries);
    println!("Current streak: {} days", stats.current_streak);
    println!("Longest streak: {} days", stats.longest_streak);
    println!(
        "Moods: {} positive, {} neutral, {} negative (most frequent: {})",
        stats.mood_distribution.positive,
        stats.mood_distribution.neutral,
        stats.mood_distribution.negative,
        stats.most_frequent_mood
    );

    if !stats.top_tags.is_empty() {
        let rendered: Vec<String> = stats
            .top_tags
            .iter()
            .map(|(name, count)| format!("{} ({})", name, count))
            .collect();
        println!("Top tags: {}", rendered.join(", "));
    }

    if !stats.category_breakdown.is_empty() {
        let rendered: Vec<String> = stats
            .category_breakdown
            .iter()
            .map(|(name, count)| format!("{} ({})", name, count))
            .collect();
        println!("Categories: {}", rendered.join(", "));
    }

    if !stats.word_count_trend.is_empty() {
        println!("Word counts:");
        for (date, count) in &stats.word_count_trend {
            println!("  {}  {}", date, count);
        }
    }

    if !stats.missed_days.is_empty() {
        let rendered: Vec<String> = stats.missed_days.iter().map(|d| d.to_string()).collect();
        println!("Missed days: {}", rendered.join(", "));
    }
}
