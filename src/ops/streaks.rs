//! Streak analytics over the journal entry history.
//!
//! A streak is a run of consecutive calendar days each containing at least
//! one entry. The current streak tolerates a not-yet-written today: if today
//! has no entry but yesterday does, the run ending yesterday still counts.

use crate::db::{entries, Database};
use crate::errors::AppResult;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Derived streak statistics. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakStats {
    /// Length of the consecutive run ending today or yesterday.
    pub current_streak: u32,
    /// Longest run of consecutive days over all history.
    pub longest_streak: u32,
    /// Total number of entries (rows, not distinct days).
    pub total_entries: usize,
}

/// Computes streak statistics from a list of entry dates.
///
/// `entry_dates` carries one element per entry; duplicates are collapsed to
/// calendar days for streak math but all count toward `total_entries`.
/// `today` is injected so callers and tests control the reference date.
///
/// The function is total: an empty input yields all zeros.
pub fn compute_streak_stats(entry_dates: &[NaiveDate], today: NaiveDate) -> StreakStats {
    let total_entries = entry_dates.len();
    let dates: HashSet<NaiveDate> = entry_dates.iter().copied().collect();

    if dates.is_empty() {
        return StreakStats {
            current_streak: 0,
            longest_streak: 0,
            total_entries: 0,
        };
    }

    // Current streak: walk backward from today if present, else from
    // yesterday if present. Two or more missed days reset it to zero.
    let yesterday = today - Days::new(1);
    let anchor = if dates.contains(&today) {
        Some(today)
    } else if dates.contains(&yesterday) {
        Some(yesterday)
    } else {
        None
    };

    let mut current_streak = 0u32;
    if let Some(anchor) = anchor {
        current_streak = 1;
        let mut check = anchor - Days::new(1);
        while dates.contains(&check) {
            current_streak += 1;
            check = check - Days::new(1);
        }
    }

    // Longest streak: scan distinct dates in descending order; a run
    // continues while the previous date is exactly one day later.
    let mut sorted: Vec<NaiveDate> = dates.into_iter().collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut longest_streak = 0u32;
    let mut run = 1u32;
    for pair in sorted.windows(2) {
        if pair[0] - Days::new(1) == pair[1] {
            run += 1;
        } else {
            longest_streak = longest_streak.max(run);
            run = 1;
        }
    }
    longest_streak = longest_streak.max(run);

    debug!(
        "Streaks: current {}, longest {}, total {}",
        current_streak, longest_streak, total_entries
    );

    StreakStats {
        current_streak,
        longest_streak,
        total_entries,
    }
}

/// Computes streak statistics over the entire entry history in the store.
///
/// # Errors
///
/// Returns an error if fetching the history fails.
pub fn streak_stats(db: &Database, today: NaiveDate) -> AppResult<StreakStats> {
    let conn = db.get_conn()?;
    let entries = entries::all_entries(&conn)?;
    let dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
    Ok(compute_streak_stats(&dates, today))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_dates_all_zero() {
        let stats = compute_streak_stats(&[], ymd(2024, 1, 6));
        assert_eq!(
            stats,
            StreakStats {
                current_streak: 0,
                longest_streak: 0,
                total_entries: 0,
            }
        );
    }

    #[test]
    fn test_run_ending_today() {
        let dates = vec![ymd(2024, 1, 4), ymd(2024, 1, 5), ymd(2024, 1, 6)];
        let stats = compute_streak_stats(&dates, ymd(2024, 1, 6));
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.longest_streak, 3);
        assert_eq!(stats.total_entries, 3);
    }

    #[test]
    fn test_run_ending_yesterday_still_counts() {
        let dates = vec![ymd(2024, 1, 3), ymd(2024, 1, 4), ymd(2024, 1, 5)];
        let stats = compute_streak_stats(&dates, ymd(2024, 1, 6));
        assert_eq!(stats.current_streak, 3);
    }

    #[test]
    fn test_two_missed_days_reset_current() {
        let dates = vec![ymd(2024, 1, 3), ymd(2024, 1, 4)];
        let stats = compute_streak_stats(&dates, ymd(2024, 1, 6));
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 2);
    }

    #[test]
    fn test_gap_scenario() {
        // Entries on Jan 1-3 and Jan 5; today is Jan 6. Yesterday (Jan 5) is
        // present so the current streak is 1; the longest run is Jan 1-3.
        let dates = vec![
            ymd(2024, 1, 1),
            ymd(2024, 1, 2),
            ymd(2024, 1, 3),
            ymd(2024, 1, 5),
        ];
        let stats = compute_streak_stats(&dates, ymd(2024, 1, 6));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 3);
        assert_eq!(stats.total_entries, 4);
    }

    #[test]
    fn test_longest_at_least_current() {
        let dates = vec![ymd(2024, 1, 5), ymd(2024, 1, 6)];
        let stats = compute_streak_stats(&dates, ymd(2024, 1, 6));
        assert!(stats.longest_streak >= stats.current_streak);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.longest_streak, 2);
    }

    #[test]
    fn test_single_old_entry() {
        let dates = vec![ymd(2023, 6, 15)];
        let stats = compute_streak_stats(&dates, ymd(2024, 1, 6));
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_duplicate_dates_collapse_for_streaks_only() {
        // Two entries on the same day: streak math sees one day, the total
        // counts both rows.
        let dates = vec![ymd(2024, 1, 6), ymd(2024, 1, 6)];
        let stats = compute_streak_stats(&dates, ymd(2024, 1, 6));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 1);
        assert_eq!(stats.total_entries, 2);
    }

    #[test]
    fn test_across_month_boundary() {
        let dates = vec![ymd(2024, 1, 31), ymd(2024, 2, 1), ymd(2024, 2, 2)];
        let stats = compute_streak_stats(&dates, ymd(2024, 2, 2));
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.longest_streak, 3);
    }
}
