//! Suggestion engine: a fixed rule set over tasks, preferences and stats.
//!
//! Rules are evaluated independently and each yields at most one suggestion:
//! - balance: ratio outside 20..=40 → warning
//! - deadline pressure: work due within 3 days exceeds the study time left → warning
//! - overload: a scheduled day carries more than 1.5× the daily maximum → warning
//!   (skipped when the daily maximum is zero)
//! - on track: balanced and no deadline pressure → success
//! - goal pace: completed extracurricular hours behind the year-to-date pace → info
//!
//! Output is ordered warning → info → success, rule order within a severity.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::preferences::StudentPreferences;
use crate::progress::{ProgressStats, BALANCE_TARGET};
use crate::schedule::{daily_load, generate_schedule, DayLoad, ScheduleEntry};
use crate::task::Task;

pub const BALANCE_LOW: f64 = 20.0;
pub const BALANCE_HIGH: f64 = 40.0;

/// Window for the deadline-pressure rule, in days.
pub const PRESSURE_HORIZON_DAYS: i64 = 3;

/// A day is overloaded above this multiple of the daily maximum.
pub const OVERLOAD_FACTOR: f64 = 1.5;

/// Severity, declared in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl Suggestion {
    fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
            action: None,
        }
    }

    fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// Run every rule. The overload rule looks at a freshly generated schedule.
pub fn generate_suggestions(
    tasks: &[Task],
    preferences: &StudentPreferences,
    stats: &ProgressStats,
    today: NaiveDate,
) -> Vec<Suggestion> {
    let schedule = generate_schedule(tasks, preferences);
    suggestions_for_schedule(tasks, preferences, stats, &schedule, today)
}

/// Same as [`generate_suggestions`] with an already computed schedule.
pub fn suggestions_for_schedule(
    tasks: &[Task],
    preferences: &StudentPreferences,
    stats: &ProgressStats,
    schedule: &[ScheduleEntry],
    today: NaiveDate,
) -> Vec<Suggestion> {
    if tasks.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();

    let balanced = (BALANCE_LOW..=BALANCE_HIGH).contains(&stats.balance_ratio);
    if !balanced {
        out.push(balance_warning(stats.balance_ratio));
    }

    let pressure = deadline_pressure(tasks, preferences, today);
    let pressured = pressure.is_some();
    out.extend(pressure);

    out.extend(overload(schedule, preferences));

    if balanced && !pressured {
        out.push(
            Suggestion::new(
                Severity::Success,
                "You're on track",
                format!(
                    "Your workload is balanced at {:.1}% extracurricular and no deadlines are at risk.",
                    stats.balance_ratio
                ),
            )
            .with_action("Keep up the current pace"),
        );
    }

    out.extend(goal_pace(stats, preferences, today));

    out.sort_by_key(|s| s.severity);
    debug!(count = out.len(), "suggestions generated");
    out
}

fn balance_warning(ratio: f64) -> Suggestion {
    if ratio < BALANCE_LOW {
        Suggestion::new(
            Severity::Warning,
            "Add more extracurricular time",
            format!(
                "Only {ratio:.1}% of your planned hours are extracurricular. Aim for about {BALANCE_TARGET:.0}% to stay balanced."
            ),
        )
        .with_action("Explore a club, sport or volunteering activity")
    } else {
        Suggestion::new(
            Severity::Warning,
            "Academics need more attention",
            format!(
                "{ratio:.1}% of your planned hours are extracurricular, above the {BALANCE_TARGET:.0}% target."
            ),
        )
        .with_action("Focus on upcoming academic deadlines")
    }
}

fn deadline_pressure(
    tasks: &[Task],
    preferences: &StudentPreferences,
    today: NaiveDate,
) -> Option<Suggestion> {
    let horizon = today + Duration::days(PRESSURE_HORIZON_DAYS);
    let capacity = preferences.daily_capacity();

    let incomplete: Vec<&Task> = tasks.iter().filter(|t| !t.completed).collect();
    let mut near: Vec<&Task> = incomplete
        .iter()
        .copied()
        .filter(|t| t.deadline <= horizon)
        .collect();
    near.sort_by(|a, b| {
        a.deadline
            .cmp(&b.deadline)
            .then_with(|| b.priority.cmp(&a.priority))
    });

    // Name the task due at the first deadline that can no longer be met.
    let (task, due, available) = near.iter().find_map(|t| {
        let due: f64 = incomplete
            .iter()
            .filter(|o| o.deadline <= t.deadline)
            .map(|o| o.hours_required)
            .sum();
        let days_left = ((t.deadline - today).num_days() + 1).max(0);
        let available = days_left as f64 * capacity;
        (due > available).then_some((*t, due, available))
    })?;
    debug!(task_id = %task.id, by = %task.deadline, due, available, "deadline pressure");

    Some(
        Suggestion::new(
            Severity::Warning,
            "Deadline pressure",
            format!(
                "\"{}\" is due {}. {due:.1}h of work is due by then but only {available:.1}h of study time is left.",
                task.name, task.deadline
            ),
        )
        .with_action(format!("Focus on \"{}\" first", task.name)),
    )
}

fn overload(schedule: &[ScheduleEntry], preferences: &StudentPreferences) -> Option<Suggestion> {
    let capacity = preferences.daily_capacity();
    // With no capacity every placement is overflow already.
    if capacity <= 0.0 {
        return None;
    }
    let limit = capacity * OVERLOAD_FACTOR;

    // Heaviest day, earliest on ties.
    let heaviest = daily_load(schedule)
        .into_iter()
        .fold(None, |best: Option<DayLoad>, d| match best {
            Some(b) if b.hours >= d.hours => Some(b),
            _ => Some(d),
        })?;

    if heaviest.hours <= limit {
        return None;
    }
    debug!(day = heaviest.day.name(), hours = heaviest.hours, "day overloaded");

    Some(
        Suggestion::new(
            Severity::Warning,
            "Overloaded day",
            format!(
                "{} has {:.1}h planned against a {:.1}h daily limit.",
                heaviest.day, heaviest.hours, capacity
            ),
        )
        .with_action("Consider moving tasks to lighter days or asking for extensions"),
    )
}

fn goal_pace(
    stats: &ProgressStats,
    preferences: &StudentPreferences,
    today: NaiveDate,
) -> Option<Suggestion> {
    let target = preferences.target_extracurricular_hours;
    if !(target.is_finite() && target > 0.0) {
        return None;
    }

    let day_of_year = today.ordinal();
    let days_in_year = NaiveDate::from_ymd_opt(today.year(), 12, 31)
        .map(|d| d.ordinal())
        .unwrap_or(365);

    let expected = target * f64::from(day_of_year) / f64::from(days_in_year);
    let completed = stats.completed_extracurricular_hours;
    if completed >= expected {
        return None;
    }

    let weeks_left = (f64::from(days_in_year - day_of_year) / 7.0).max(1.0);
    let per_week = (target - completed) / weeks_left;

    Some(
        Suggestion::new(
            Severity::Info,
            "Extracurricular goal pace",
            format!(
                "You've completed {completed:.0} of {target:.0} extracurricular hours; about {expected:.0} would be on pace by now."
            ),
        )
        .with_action(format!(
            "Consider adding about {per_week:.1} extracurricular hours per week"
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::calculate_progress;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(10, 19)
    }

    fn no_goal() -> StudentPreferences {
        StudentPreferences {
            target_extracurricular_hours: 0.0,
            ..Default::default()
        }
    }

    fn run(tasks: &[Task], prefs: &StudentPreferences) -> Vec<Suggestion> {
        let stats = calculate_progress(tasks, today());
        generate_suggestions(tasks, prefs, &stats, today())
    }

    #[test]
    fn empty_task_set_gives_nothing() {
        assert!(run(&[], &StudentPreferences::default()).is_empty());
    }

    #[test]
    fn unbalanced_ratio_warns() {
        // 5 academic, 5 extracurricular: ratio 50.
        let tasks = vec![
            Task::academic("a", "Reading", "Literature", 3, date(11, 20)).with_hours(5.0),
            Task::extracurricular("e", "Training", "Rowing", date(11, 20)).with_hours(5.0),
        ];
        let out = run(&tasks, &no_goal());
        let warning = out.iter().find(|s| s.severity == Severity::Warning).unwrap();
        assert_eq!(warning.title, "Academics need more attention");
        assert!(out.iter().all(|s| s.severity != Severity::Success));
    }

    #[test]
    fn low_ratio_recommends_extracurriculars() {
        let tasks = vec![Task::academic("a", "Reading", "Literature", 3, date(11, 20)).with_hours(5.0)];
        let out = run(&tasks, &no_goal());
        assert_eq!(out[0].title, "Add more extracurricular time");
        assert!(out[0].action.as_deref().unwrap().starts_with("Explore"));
    }

    #[test]
    fn balanced_without_near_deadlines_succeeds() {
        let tasks = vec![
            Task::academic("a", "Project", "Physics", 4, date(10, 30)).with_hours(7.0),
            Task::extracurricular("e", "Match", "Tennis", date(10, 30)).with_hours(3.0),
        ];
        let out = run(&tasks, &no_goal());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].severity, Severity::Success);
        assert_eq!(out[0].action.as_deref(), Some("Keep up the current pace"));
    }

    #[test]
    fn deadline_pressure_names_most_urgent_task() {
        let prefs = StudentPreferences {
            max_study_hours_per_day: 2.0,
            ..no_goal()
        };
        let tasks = vec![
            Task::academic("a", "Lab write-up", "Biology", 4, date(10, 20)).with_hours(7.0),
            Task::extracurricular("e", "Concert", "Choir", date(10, 30)).with_hours(3.0),
        ];
        let out = run(&tasks, &prefs);

        let pressure = out.iter().find(|s| s.title == "Deadline pressure").unwrap();
        assert!(pressure.message.contains("Lab write-up"));
        // Ratio 30 but the deadline is at risk: no success.
        assert!(out.iter().all(|s| s.severity != Severity::Success));
    }

    #[test]
    fn deadline_pressure_names_task_due_at_the_shortfall() {
        let prefs = StudentPreferences {
            max_study_hours_per_day: 2.0,
            ..no_goal()
        };
        // 1h due today fits; 7h due within three days does not.
        let tasks = vec![
            Task::academic("a", "Flashcards", "Spanish", 2, date(10, 19)).with_hours(1.0),
            Task::academic("b", "Midterm review", "Economics", 4, date(10, 21)).with_hours(6.0),
        ];
        let out = run(&tasks, &prefs);

        let pressure = out.iter().find(|s| s.title == "Deadline pressure").unwrap();
        assert!(pressure.message.starts_with("\"Midterm review\" is due 2026-10-21"));
        assert!(!pressure.message.contains("Flashcards"));
    }

    #[test]
    fn near_deadline_with_enough_time_is_not_pressure() {
        let tasks = vec![
            Task::academic("a", "Quiz prep", "Biology", 4, date(10, 21)).with_hours(7.0),
            Task::extracurricular("e", "Concert", "Choir", date(10, 30)).with_hours(3.0),
        ];
        let out = run(&tasks, &no_goal());
        assert!(out.iter().all(|s| s.title != "Deadline pressure"));
        assert_eq!(out.last().unwrap().severity, Severity::Success);
    }

    #[test]
    fn oversized_day_is_overload() {
        let tasks = vec![
            Task::academic("a", "Thesis draft", "Sociology", 6, date(11, 20)).with_hours(14.0),
            Task::extracurricular("e", "Tournament", "Chess", date(11, 20)).with_hours(6.0),
        ];
        let out = run(&tasks, &no_goal());
        let overload = out.iter().find(|s| s.title == "Overloaded day").unwrap();
        assert!(overload.message.starts_with("Monday"));
    }

    #[test]
    fn zero_capacity_skips_overload() {
        let prefs = StudentPreferences {
            max_study_hours_per_day: 0.0,
            ..no_goal()
        };
        let tasks = vec![
            Task::academic("a", "Thesis draft", "Sociology", 6, date(11, 20)).with_hours(7.0),
            Task::extracurricular("e", "Tournament", "Chess", date(11, 20)).with_hours(3.0),
        ];
        let out = run(&tasks, &prefs);
        assert!(out.iter().all(|s| s.title != "Overloaded day"));
    }

    #[test]
    fn behind_goal_pace_gives_info_after_warnings() {
        let prefs = StudentPreferences {
            target_extracurricular_hours: 400.0,
            ..Default::default()
        };
        let tasks = vec![Task::academic("a", "Reading", "Literature", 3, date(11, 20)).with_hours(5.0)];
        let out = run(&tasks, &prefs);

        let severities: Vec<Severity> = out.iter().map(|s| s.severity).collect();
        assert_eq!(severities, vec![Severity::Warning, Severity::Info]);
        assert!(out[1].action.as_deref().unwrap().contains("per week"));
    }

    #[test]
    fn suggestion_json_uses_type_key() {
        let s = Suggestion::new(Severity::Info, "t", "m");
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"type\":\"info\""));
        assert!(!json.contains("action"));
    }
}
