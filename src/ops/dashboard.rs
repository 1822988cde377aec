//! Dashboard analytics over a date range of journal entries.
//!
//! Aggregates mood distribution, tag frequencies, category breakdown, the
//! word-count trend, and missed days for a closed date range. Streak values
//! are deliberately computed over the entire history, not the range: streaks
//! are a lifetime metric.

use crate::db::entries::{self, Entry};
use crate::db::Database;
use crate::errors::AppResult;
use crate::ops::streaks::{compute_streak_stats, StreakStats};
use crate::text;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

/// Moods counted in the Positive bucket.
pub const POSITIVE_MOODS: &[&str] = &["Happy", "Excited", "Relaxed", "Grateful", "Confident"];
/// Moods counted in the Neutral bucket.
pub const NEUTRAL_MOODS: &[&str] = &["Calm", "Thoughtful", "Curious", "Nostalgic", "Bored"];
/// Moods counted in the Negative bucket.
pub const NEGATIVE_MOODS: &[&str] = &["Sad", "Angry", "Stressed", "Lonely", "Anxious"];

/// Number of top tags reported.
const TOP_TAG_COUNT: usize = 5;

/// Counts of primary moods classified into the three fixed sentiment buckets.
///
/// Moods outside all three sets are counted in none of the buckets, so the
/// bucket sum may be less than the entry total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MoodDistribution {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

/// Derived dashboard statistics for a date range. Ephemeral, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    /// Number of entries inside the range.
    pub total_entries: usize,
    /// Lifetime current streak (full history, not range-scoped).
    pub current_streak: u32,
    /// Lifetime longest streak (full history, not range-scoped).
    pub longest_streak: u32,
    /// Range days with no entry that are strictly before today, ascending.
    pub missed_days: Vec<NaiveDate>,
    pub mood_distribution: MoodDistribution,
    /// Most frequent primary mood, "None" when the range has no moods.
    pub most_frequent_mood: String,
    /// Top tags by frequency, at most five, ties broken by encounter order.
    pub top_tags: Vec<(String, usize)>,
    /// Count per distinct non-empty category, in encounter order.
    pub category_breakdown: Vec<(String, usize)>,
    /// One (date, word count) point per entry, ascending by date.
    pub word_count_trend: Vec<(NaiveDate, usize)>,
}

/// Increments `label`'s count in an encounter-ordered frequency list.
fn bump_count(counts: &mut Vec<(String, usize)>, label: &str) {
    if let Some(slot) = counts.iter_mut().find(|(name, _)| name == label) {
        slot.1 += 1;
    } else {
        counts.push((label.to_string(), 1));
    }
}

/// Aggregates dashboard statistics from already-fetched range entries.
///
/// `range_entries` must hold the entries whose dates fall inside
/// `[start, end]`; `streaks` carries the full-history streak values. `today`
/// bounds the missed-day computation and is injected for testability.
pub fn compute_dashboard_stats(
    range_entries: &[Entry],
    streaks: &StreakStats,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> DashboardStats {
    let mut mood_distribution = MoodDistribution::default();
    let mut mood_counts: Vec<(String, usize)> = Vec::new();
    let mut tag_counts: Vec<(String, usize)> = Vec::new();
    let mut category_breakdown: Vec<(String, usize)> = Vec::new();

    for entry in range_entries {
        let mood = entry.primary_mood.as_str();
        if POSITIVE_MOODS.contains(&mood) {
            mood_distribution.positive += 1;
        } else if NEUTRAL_MOODS.contains(&mood) {
            mood_distribution.neutral += 1;
        } else if NEGATIVE_MOODS.contains(&mood) {
            mood_distribution.negative += 1;
        }

        if !mood.is_empty() {
            bump_count(&mut mood_counts, mood);
        }

        for tag in text::split_labels(&entry.tags) {
            bump_count(&mut tag_counts, tag);
        }

        if !entry.category.is_empty() {
            bump_count(&mut category_breakdown, &entry.category);
        }
    }

    // Only a strictly greater count displaces the leader, so ties keep the
    // first-encountered label.
    let mut most_frequent_mood = "None".to_string();
    let mut best_count = 0usize;
    for (name, count) in &mood_counts {
        if *count > best_count {
            best_count = *count;
            most_frequent_mood = name.clone();
        }
    }

    // Stable sort preserves encounter order among equal counts.
    tag_counts.sort_by(|a, b| b.1.cmp(&a.1));
    tag_counts.truncate(TOP_TAG_COUNT);

    // One point per entry; the range query returns them oldest first.
    let mut trend_entries: Vec<&Entry> = range_entries.iter().collect();
    trend_entries.sort_by_key(|e| e.date);
    let word_count_trend = trend_entries
        .iter()
        .map(|e| (e.date, text::count_words(&e.content)))
        .collect();

    // Every range day with no entry that is already in the past.
    let covered: HashSet<NaiveDate> = range_entries.iter().map(|e| e.date).collect();
    let mut missed_days = Vec::new();
    let mut day = start;
    while day <= end {
        if !covered.contains(&day) && day < today {
            missed_days.push(day);
        }
        day = day + Days::new(1);
    }

    DashboardStats {
        total_entries: range_entries.len(),
        current_streak: streaks.current_streak,
        longest_streak: streaks.longest_streak,
        missed_days,
        mood_distribution,
        most_frequent_mood,
        top_tags: tag_counts,
        category_breakdown,
        word_count_trend,
    }
}

/// Computes dashboard statistics for the closed range `[start, end]`.
///
/// # Errors
///
/// Returns an error if fetching entries from the store fails.
pub fn dashboard_stats(
    db: &Database,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> AppResult<DashboardStats> {
    info!("Computing dashboard stats for {}..={}", start, end);

    let conn = db.get_conn()?;
    let range_entries = entries::entries_in_range(&conn, start, end)?;

    let history = entries::all_entries(&conn)?;
    let history_dates: Vec<NaiveDate> = history.iter().map(|e| e.date).collect();
    let streaks = compute_streak_stats(&history_dates, today);

    debug!(
        "Range holds {} entries, history holds {}",
        range_entries.len(),
        history.len()
    );
    Ok(compute_dashboard_stats(
        &range_entries,
        &streaks,
        start,
        end,
        today,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::entries::Entry;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(date: NaiveDate, mood: &str, tags: &str, category: &str, content: &str) -> Entry {
        let mut e = Entry::draft(date);
        e.primary_mood = mood.to_string();
        e.tags = tags.to_string();
        e.category = category.to_string();
        e.content = content.to_string();
        e
    }

    fn no_streaks() -> StreakStats {
        StreakStats {
            current_streak: 0,
            longest_streak: 0,
            total_entries: 0,
        }
    }

    #[test]
    fn test_empty_range_still_reports_missed_days() {
        let stats = compute_dashboard_stats(
            &[],
            &no_streaks(),
            ymd(2024, 2, 1),
            ymd(2024, 2, 3),
            ymd(2024, 2, 10),
        );

        assert_eq!(stats.total_entries, 0);
        assert_eq!(
            stats.missed_days,
            vec![ymd(2024, 2, 1), ymd(2024, 2, 2), ymd(2024, 2, 3)]
        );
        assert_eq!(stats.mood_distribution, MoodDistribution::default());
        assert_eq!(stats.most_frequent_mood, "None");
        assert!(stats.top_tags.is_empty());
        assert!(stats.category_breakdown.is_empty());
        assert!(stats.word_count_trend.is_empty());
    }

    #[test]
    fn test_missed_days_exclude_today_and_future() {
        let stats = compute_dashboard_stats(
            &[],
            &no_streaks(),
            ymd(2024, 2, 8),
            ymd(2024, 2, 12),
            ymd(2024, 2, 10),
        );
        // Only days strictly before today count as missed
        assert_eq!(stats.missed_days, vec![ymd(2024, 2, 8), ymd(2024, 2, 9)]);
    }

    #[test]
    fn test_mood_buckets_sum_at_most_total() {
        let entries = vec![
            entry(ymd(2024, 3, 1), "Happy", "", "", ""),
            entry(ymd(2024, 3, 2), "Stressed", "", "", ""),
            entry(ymd(2024, 3, 3), "Euphoric", "", "", ""), // outside all buckets
        ];
        let stats = compute_dashboard_stats(
            &entries,
            &no_streaks(),
            ymd(2024, 3, 1),
            ymd(2024, 3, 3),
            ymd(2024, 3, 10),
        );

        let bucket_sum = stats.mood_distribution.positive
            + stats.mood_distribution.neutral
            + stats.mood_distribution.negative;
        assert_eq!(bucket_sum, 2);
        assert!(bucket_sum <= stats.total_entries);
        assert_eq!(stats.mood_distribution.positive, 1);
        assert_eq!(stats.mood_distribution.negative, 1);
    }

    #[test]
    fn test_unbucketed_mood_still_counts_for_most_frequent() {
        let entries = vec![
            entry(ymd(2024, 3, 1), "Euphoric", "", "", ""),
            entry(ymd(2024, 3, 2), "Euphoric", "", "", ""),
            entry(ymd(2024, 3, 3), "Happy", "", "", ""),
        ];
        let stats = compute_dashboard_stats(
            &entries,
            &no_streaks(),
            ymd(2024, 3, 1),
            ymd(2024, 3, 3),
            ymd(2024, 3, 10),
        );
        assert_eq!(stats.most_frequent_mood, "Euphoric");
    }

    #[test]
    fn test_most_frequent_mood_tie_keeps_first_encountered() {
        let entries = vec![
            entry(ymd(2024, 3, 1), "Calm", "", "", ""),
            entry(ymd(2024, 3, 2), "Happy", "", "", ""),
        ];
        let stats = compute_dashboard_stats(
            &entries,
            &no_streaks(),
            ymd(2024, 3, 1),
            ymd(2024, 3, 2),
            ymd(2024, 3, 10),
        );
        assert_eq!(stats.most_frequent_mood, "Calm");
    }

    #[test]
    fn test_top_tags_parse_trim_and_rank() {
        let entries = vec![
            entry(ymd(2024, 3, 1), "", "Travel, Music,,  Work ", "", ""),
            entry(ymd(2024, 3, 2), "", "Travel", "", ""),
        ];
        let stats = compute_dashboard_stats(
            &entries,
            &no_streaks(),
            ymd(2024, 3, 1),
            ymd(2024, 3, 2),
            ymd(2024, 3, 10),
        );

        assert_eq!(stats.top_tags[0], ("Travel".to_string(), 2));
        let names: Vec<&str> = stats.top_tags.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Travel", "Music", "Work"]);
    }

    #[test]
    fn test_top_tags_capped_at_five() {
        let entries = vec![entry(
            ymd(2024, 3, 1),
            "",
            "One, Two, Three, Four, Five, Six, Seven",
            "",
            "",
        )];
        let stats = compute_dashboard_stats(
            &entries,
            &no_streaks(),
            ymd(2024, 3, 1),
            ymd(2024, 3, 1),
            ymd(2024, 3, 10),
        );
        assert_eq!(stats.top_tags.len(), 5);
    }

    #[test]
    fn test_category_breakdown_skips_empty() {
        let entries = vec![
            entry(ymd(2024, 3, 1), "", "", "Personal", ""),
            entry(ymd(2024, 3, 2), "", "", "", ""),
            entry(ymd(2024, 3, 3), "", "", "Personal", ""),
            entry(ymd(2024, 3, 4), "", "", "Work", ""),
        ];
        let stats = compute_dashboard_stats(
            &entries,
            &no_streaks(),
            ymd(2024, 3, 1),
            ymd(2024, 3, 4),
            ymd(2024, 3, 10),
        );
        assert_eq!(
            stats.category_breakdown,
            vec![("Personal".to_string(), 2), ("Work".to_string(), 1)]
        );
    }

    #[test]
    fn test_word_count_trend_strips_markup_one_point_per_entry() {
        let entries = vec![
            entry(ymd(2024, 3, 2), "", "", "", "<p>three words here</p>"),
            entry(ymd(2024, 3, 1), "", "", "", "one <b>two</b>"),
        ];
        let stats = compute_dashboard_stats(
            &entries,
            &no_streaks(),
            ymd(2024, 3, 1),
            ymd(2024, 3, 2),
            ymd(2024, 3, 10),
        );
        assert_eq!(
            stats.word_count_trend,
            vec![(ymd(2024, 3, 1), 2), (ymd(2024, 3, 2), 3)]
        );
    }

    #[test]
    fn test_streaks_passed_through_from_full_history() {
        let streaks = StreakStats {
            current_streak: 4,
            longest_streak: 9,
            total_entries: 40,
        };
        let stats = compute_dashboard_stats(
            &[],
            &streaks,
            ymd(2024, 3, 1),
            ymd(2024, 3, 2),
            ymd(2024, 3, 10),
        );
        assert_eq!(stats.current_streak, 4);
        assert_eq!(stats.longest_streak, 9);
        // Range total stays range-scoped even though history has 40 entries
        assert_eq!(stats.total_entries, 0);
    }
}
