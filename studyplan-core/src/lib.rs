//! studyplan-core: weekly allocation, progress and suggestions for a
//! student's academic and extracurricular workload.
//!
//! Every entry point is a pure function of its inputs; callers re-run the
//! pipeline on each change to their tasks or preferences.

pub mod error;
pub mod labels;
pub mod pipeline;
pub mod preferences;
pub mod progress;
pub mod schedule;
pub mod suggestions;
pub mod task;
pub mod task_set;
pub mod time;

pub use error::ValidationError;
pub use labels::{priority_color, priority_label, PriorityColor};
pub use pipeline::{plan, PlanReport};
pub use preferences::{StudentPreferences, TimeSlot};
pub use progress::{
    calculate_progress, BalanceStatus, DashboardMetrics, ProgressStats, TargetProgressMode,
};
pub use schedule::{daily_load, dated, entries_for, generate_schedule, DayLoad, ScheduleEntry};
pub use suggestions::{generate_suggestions, suggestions_for_schedule, Severity, Suggestion};
pub use task::{Priority, Task, TaskCategory, TaskKind, MAX_TASK_HOURS};
pub use task_set::TaskSet;
pub use time::{week_start, ClockTime, TimePreference, WeekDay};
