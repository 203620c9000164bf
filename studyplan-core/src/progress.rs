//! Progress calculator and dashboard metrics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total hours | Sum of `hours_required` per category, all tasks |
//! | Completed hours | Same, completed tasks only |
//! | Balance ratio | extracurricular / (academic + extracurricular) × 100 |
//! | Upcoming deadlines | Incomplete tasks due within 7 days, soonest first |
//!
//! Every ratio with a zero denominator is 0.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskCategory};

/// Lookahead for the upcoming-deadline list, in days.
pub const UPCOMING_HORIZON_DAYS: i64 = 7;

/// Ideal share of extracurricular hours, in percent.
pub const BALANCE_TARGET: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgressStats {
    pub total_academic_hours: f64,
    pub total_extracurricular_hours: f64,
    pub completed_academic_hours: f64,
    pub completed_extracurricular_hours: f64,
    /// Incomplete tasks due on or before `today + 7 days`, overdue ones
    /// included, soonest first. Truncation is left to the caller.
    pub upcoming_deadlines: Vec<Task>,
    /// Percentage of all required hours that are extracurricular.
    pub balance_ratio: f64,
}

impl ProgressStats {
    pub fn total_hours(&self) -> f64 {
        self.total_academic_hours + self.total_extracurricular_hours
    }
}

/// Aggregate hours per category and pick out near-term deadlines.
pub fn calculate_progress(tasks: &[Task], today: NaiveDate) -> ProgressStats {
    let mut stats = ProgressStats::default();

    for task in tasks {
        let hours = task.hours_required;
        let done = if task.completed { hours } else { 0.0 };
        match task.category() {
            TaskCategory::Academic => {
                stats.total_academic_hours += hours;
                stats.completed_academic_hours += done;
            }
            TaskCategory::Extracurricular => {
                stats.total_extracurricular_hours += hours;
                stats.completed_extracurricular_hours += done;
            }
        }
    }

    stats.balance_ratio = percent(stats.total_extracurricular_hours, stats.total_hours());

    let horizon = today + Duration::days(UPCOMING_HORIZON_DAYS);
    let mut upcoming: Vec<Task> = tasks
        .iter()
        .filter(|t| !t.completed && t.deadline <= horizon)
        .cloned()
        .collect();
    upcoming.sort_by_key(|t| t.deadline);
    stats.upcoming_deadlines = upcoming;

    stats
}

/// `part / whole × 100`, or 0 when `whole` is not positive.
pub fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

/// How the annual extracurricular goal progress is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetProgressMode {
    /// Completed extracurricular hours against the goal.
    #[default]
    CompletedOnly,
    /// `(completed + total - completed) / goal`: counts planned but
    /// unfinished hours as progress. Kept for compatibility with older
    /// dashboards.
    Legacy,
}

/// Dashboard badge for the balance ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceStatus {
    Optimal,
    Adjust,
}

impl BalanceStatus {
    pub fn from_ratio(ratio: f64) -> Self {
        if (25.0..=35.0).contains(&ratio) {
            BalanceStatus::Optimal
        } else {
            BalanceStatus::Adjust
        }
    }
}

/// Percentages shown on the progress dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub academic_progress: f64,
    pub extracurricular_progress: f64,
    pub balance_status: BalanceStatus,
    /// Progress toward the annual extracurricular goal, capped at 100.
    pub target_progress: f64,
}

impl DashboardMetrics {
    pub fn from_stats(stats: &ProgressStats, target_hours: f64, mode: TargetProgressMode) -> Self {
        let counted = match mode {
            TargetProgressMode::CompletedOnly => stats.completed_extracurricular_hours,
            TargetProgressMode::Legacy => {
                stats.completed_extracurricular_hours + stats.total_extracurricular_hours
                    - stats.completed_extracurricular_hours
            }
        };

        Self {
            academic_progress: percent(stats.completed_academic_hours, stats.total_academic_hours),
            extracurricular_progress: percent(
                stats.completed_extracurricular_hours,
                stats.total_extracurricular_hours,
            ),
            balance_status: BalanceStatus::from_ratio(stats.balance_ratio),
            target_progress: percent(counted, target_hours).min(100.0),
        }
    }
}
