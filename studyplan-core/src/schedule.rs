//! Slot allocator: packs incomplete tasks into a Monday→Sunday week.
//!
//! Algorithm (deterministic, greedy):
//! 1) keep incomplete tasks only
//! 2) rank by deadline ASC, then priority DESC, then input order
//! 3) place each task on the first day whose remaining capacity fits it;
//!    if no day fits, overflow onto the day with the most remaining capacity
//! 4) within a day, lay slots back to back from the preferred window's start
//!
//! Capacity is `max_study_hours_per_day`, one budget shared by academic and
//! extracurricular work. Tasks are never dropped.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::preferences::StudentPreferences;
use crate::task::{Task, MAX_TASK_HOURS};
use crate::time::{ClockTime, WeekDay};

/// One task placed on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub task: Task,
    pub day: WeekDay,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

impl ScheduleEntry {
    pub fn hours(&self) -> f64 {
        f64::from(self.end_time.minutes() - self.start_time.minutes()) / 60.0
    }

    /// True when the half-open ranges [start, end) intersect on the same day.
    pub fn overlaps(&self, other: &ScheduleEntry) -> bool {
        self.day == other.day
            && self.start_time < other.end_time
            && other.start_time < self.end_time
    }
}

/// Hours booked on a day against the daily maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayLoad {
    pub day: WeekDay,
    pub hours: f64,
    pub task_count: usize,
}

/// Allocate tasks into the week. Pure: identical input gives identical output.
pub fn generate_schedule(tasks: &[Task], preferences: &StudentPreferences) -> Vec<ScheduleEntry> {
    let capacity = preferences.daily_capacity();
    let (window_start, window_end) = preferences.preferred_study_time.window();

    let mut candidates: Vec<&Task> = tasks.iter().filter(|t| !t.completed).collect();
    // sort_by is stable, so input order breaks remaining ties.
    candidates.sort_by(|a, b| {
        a.deadline
            .cmp(&b.deadline)
            .then_with(|| b.priority.cmp(&a.priority))
    });

    let mut remaining = [capacity; 7];
    let mut cursor = [window_start; 7];
    let mut days: [Vec<ScheduleEntry>; 7] = Default::default();

    for task in candidates {
        let hours = task.hours_required;

        let idx = match remaining.iter().position(|r| *r >= hours) {
            Some(idx) => idx,
            None => {
                let idx = most_remaining(&remaining);
                debug!(
                    task_id = %task.id,
                    hours,
                    day = WeekDay::ALL[idx].name(),
                    "no day fits; overflowing"
                );
                idx
            }
        };

        remaining[idx] -= hours;

        let start = cursor[idx];
        let end = start.plus_minutes(slot_minutes(hours));
        cursor[idx] = end;

        if end > window_end {
            debug!(task_id = %task.id, end = %end, "slot runs past preferred window");
        }

        let mut placed = task.clone();
        placed.scheduled_time = Some(start);
        days[idx].push(ScheduleEntry {
            task: placed,
            day: WeekDay::ALL[idx],
            start_time: start,
            end_time: end,
        });
    }

    let out: Vec<ScheduleEntry> = days.into_iter().flatten().collect();
    debug!(entries = out.len(), "schedule generated");
    out
}

/// Fill `scheduled_date` on every entry for the week starting at `week_start`
/// (a Monday).
pub fn dated(mut schedule: Vec<ScheduleEntry>, week_start: NaiveDate) -> Vec<ScheduleEntry> {
    for entry in schedule.iter_mut() {
        entry.task.scheduled_date = Some(entry.day.date_in_week(week_start));
    }
    schedule
}

/// Per-day totals, Monday→Sunday, including empty days.
pub fn daily_load(schedule: &[ScheduleEntry]) -> Vec<DayLoad> {
    WeekDay::ALL
        .iter()
        .map(|day| {
            let entries = schedule.iter().filter(|e| e.day == *day);
            let (hours, task_count) = entries.fold((0.0, 0), |(h, n), e| (h + e.task.hours_required, n + 1));
            DayLoad {
                day: *day,
                hours,
                task_count,
            }
        })
        .collect()
}

/// Entries for one day, in start-time order.
pub fn entries_for(schedule: &[ScheduleEntry], day: WeekDay) -> Vec<&ScheduleEntry> {
    schedule.iter().filter(|e| e.day == day).collect()
}

// Unvalidated estimates are clamped so slot ends stay in range.
fn slot_minutes(hours: f64) -> u32 {
    ((hours.min(MAX_TASK_HOURS) * 60.0).round() as u32).max(1)
}

// Earliest day wins ties.
fn most_remaining(remaining: &[f64; 7]) -> usize {
    let mut best = 0;
    for (i, r) in remaining.iter().enumerate().skip(1) {
        if *r > remaining[best] {
            best = i;
        }
    }
    best
}
