//! Full pipeline: allocator → progress → suggestions, from scratch on every call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::preferences::StudentPreferences;
use crate::progress::{calculate_progress, ProgressStats};
use crate::schedule::{generate_schedule, ScheduleEntry};
use crate::suggestions::{suggestions_for_schedule, Suggestion};
use crate::task::Task;

/// Everything derived from one snapshot of tasks + preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    pub schedule: Vec<ScheduleEntry>,
    pub stats: ProgressStats,
    pub suggestions: Vec<Suggestion>,
}

pub fn plan(tasks: &[Task], preferences: &StudentPreferences, today: NaiveDate) -> PlanReport {
    let schedule = generate_schedule(tasks, preferences);
    let stats = calculate_progress(tasks, today);
    let suggestions = suggestions_for_schedule(tasks, preferences, &stats, &schedule, today);

    PlanReport {
        schedule,
        stats,
        suggestions,
    }
}
