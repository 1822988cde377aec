//! Command-line interface for parsing and handling user arguments.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Parses a date in YYYY-MM-DD or YYYYMMDD format.
pub fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y%m%d"))
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD or YYYYMMDD", raw))
}

/// A personal journal: dated entries, mood and tag analytics, text export
#[derive(Parser, Debug)]
#[command(name = "daybook", about = "A personal journal: dated entries, mood and tag analytics, text export")]
#[command(author, version, long_about = None)]
pub struct CliArgs {
    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write or overwrite the entry for a date
    Add {
        /// Entry date (format: YYYY-MM-DD or YYYYMMDD)
        #[arg(short, long, value_parser = parse_date_arg)]
        date: NaiveDate,
        /// Entry title
        #[arg(short, long)]
        title: String,
        /// Entry content (markup allowed)
        #[arg(short, long, default_value = "")]
        content: String,
        /// Primary mood label
        #[arg(short, long, default_value = "")]
        mood: String,
        /// Secondary mood labels, comma-delimited
        #[arg(long, default_value = "")]
        secondary: String,
        /// Tag labels, comma-delimited
        #[arg(long, default_value = "")]
        tags: String,
        /// Category label
        #[arg(long, default_value = "")]
        category: String,
    },

    /// Show the entry for a date
    Show {
        /// Entry date (format: YYYY-MM-DD or YYYYMMDD)
        #[arg(short, long, value_parser = parse_date_arg)]
        date: NaiveDate,
    },

    /// Delete the entry for a date
    Delete {
        /// Entry date (format: YYYY-MM-DD or YYYYMMDD)
        #[arg(short, long, value_parser = parse_date_arg)]
        date: NaiveDate,
    },

    /// List entries matching optional filters, newest first
    List {
        /// Substring to search in titles and content
        #[arg(short, long)]
        search: Option<String>,
        /// Exact entry date
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
        /// Mood label (primary or secondary)
        #[arg(short, long)]
        mood: Option<String>,
        /// Tag label
        #[arg(short, long)]
        tag: Option<String>,
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Entries per page
        #[arg(long, default_value_t = 10)]
        page_size: usize,
    },

    /// List the tag vocabulary, or add a tag to it
    Tags {
        /// Add a tag with this name
        #[arg(long)]
        add: Option<String>,
    },

    /// Show current and longest journaling streaks
    Streaks {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show dashboard statistics for a date range
    Dashboard {
        /// Range start (inclusive)
        #[arg(long, value_parser = parse_date_arg)]
        from: NaiveDate,
        /// Range end (inclusive)
        #[arg(long, value_parser = parse_date_arg)]
        to: NaiveDate,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Export a date range as a paginated text document
    Export {
        /// Range start (inclusive)
        #[arg(long, value_parser = parse_date_arg)]
        from: NaiveDate,
        /// Range end (inclusive)
        #[arg(long, value_parser = parse_date_arg)]
        to: NaiveDate,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_date_arg_iso() {
        let date = parse_date_arg("2023-01-15").unwrap();
        assert_eq!(date.year(), 2023);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_date_arg_compact() {
        let date = parse_date_arg("20230115").unwrap();
        assert_eq!(date.year(), 2023);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_date_arg_invalid() {
        assert!(parse_date_arg("not-a-date").is_err());
        assert!(parse_date_arg("2023-13-01").is_err());
    }

    #[test]
    fn test_add_command() {
        let args = CliArgs::parse_from(vec![
            "daybook", "add", "--date", "2024-01-01", "--title", "New year",
        ]);
        match args.command {
            Command::Add { date, title, .. } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
                assert_eq!(title, "New year");
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_list_defaults() {
        let args = CliArgs::parse_from(vec!["daybook", "list"]);
        match args.command {
            Command::List {
                search,
                date,
                mood,
                tag,
                page,
                page_size,
            } => {
                assert!(search.is_none());
                assert!(date.is_none());
                assert!(mood.is_none());
                assert!(tag.is_none());
                assert_eq!(page, 1);
                assert_eq!(page_size, 10);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_list_with_filters() {
        let args = CliArgs::parse_from(vec![
            "daybook", "list", "--search", "beach", "--mood", "Happy", "--tag", "Travel",
        ]);
        match args.command {
            Command::List {
                search, mood, tag, ..
            } => {
                assert_eq!(search.as_deref(), Some("beach"));
                assert_eq!(mood.as_deref(), Some("Happy"));
                assert_eq!(tag.as_deref(), Some("Travel"));
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_dashboard_command() {
        let args = CliArgs::parse_from(vec![
            "daybook",
            "dashboard",
            "--from",
            "2024-02-01",
            "--to",
            "2024-02-29",
            "--json",
        ]);
        match args.command {
            Command::Dashboard { from, to, json } => {
                assert_eq!(from, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
                assert_eq!(to, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
                assert!(json);
            }
            _ => panic!("Expected Dashboard command"),
        }
    }

    #[test]
    fn test_verbose_flag_is_global() {
        let args = CliArgs::parse_from(vec!["daybook", "streaks", "--verbose"]);
        assert!(args.verbose);
    }
}
