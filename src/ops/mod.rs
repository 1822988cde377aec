//! High-level operations over the journal entry store.
//!
//! This module provides the user-facing operations of the data layer:
//! streak analytics, dashboard aggregation, and paginated text export.

pub mod dashboard;
pub mod export;
pub mod streaks;

// Re-export commonly used functions
pub use dashboard::{compute_dashboard_stats, dashboard_stats, DashboardStats, MoodDistribution};
pub use export::export_range;
pub use streaks::{compute_streak_stats, streak_stats, StreakStats};
