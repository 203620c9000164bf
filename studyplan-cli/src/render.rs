use chrono::NaiveDate;
use studyplan_core::{
    entries_for, priority_label, ClockTime, DashboardMetrics, ProgressStats, ScheduleEntry,
    Severity, Suggestion, Task, TaskCategory, TaskKind, TaskSet, WeekDay,
};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Wall-clock time, with a day marker once a slot runs past midnight.
fn clock(t: ClockTime) -> String {
    let days = t.minutes() / MINUTES_PER_DAY;
    if days == 0 {
        t.to_string()
    } else {
        format!("{} (+{}d)", t.wall_clock(), days)
    }
}

fn category_tag(task: &Task) -> &'static str {
    match task.category() {
        TaskCategory::Academic => "ACA",
        TaskCategory::Extracurricular => "EXT",
    }
}

pub fn task_line(task: &Task) -> String {
    format!(
        "[{}] {} {} | {} ({}) | {:.2}h | {} | due {} | {}",
        if task.completed { "x" } else { " " },
        category_tag(task),
        task.name,
        task.kind.detail(),
        task.id,
        task.hours_required,
        priority_label(task.priority),
        task.deadline,
        match &task.kind {
            TaskKind::Academic { credits, .. } => format!("{credits} credits"),
            TaskKind::Extracurricular { .. } => "activity".to_string(),
        },
    )
}

pub fn task_list(tasks: &TaskSet) -> String {
    if tasks.is_empty() {
        return "No tasks yet. Add one with `studyplan task add`.\n".to_string();
    }
    let mut out = format!("Tasks: {} ({} active)\n\n", tasks.len(), tasks.active_count());
    for t in tasks.display_order() {
        out.push_str(&task_line(t));
        out.push('\n');
    }
    out
}

pub fn schedule(schedule: &[ScheduleEntry], week_start: NaiveDate) -> String {
    let mut out = format!("# Week of {week_start}\n");
    for day in WeekDay::ALL {
        let entries = entries_for(schedule, day);
        out.push_str(&format!("\n## {} {}\n", day, day.date_in_week(week_start)));
        if entries.is_empty() {
            out.push_str("- (free)\n");
            continue;
        }
        for e in entries {
            out.push_str(&format!(
                "- {}-{} {} {} ({:.2}h, {})\n",
                clock(e.start_time),
                clock(e.end_time),
                category_tag(&e.task),
                e.task.name,
                e.task.hours_required,
                priority_label(e.task.priority),
            ));
        }
    }
    out
}

pub fn progress(stats: &ProgressStats, metrics: &DashboardMetrics, upcoming_limit: usize) -> String {
    let mut out = String::from("# Progress\n\n");
    out.push_str(&format!(
        "Academic:        {:.1}/{:.1}h ({:.0}%)\n",
        stats.completed_academic_hours, stats.total_academic_hours, metrics.academic_progress
    ));
    out.push_str(&format!(
        "Extracurricular: {:.1}/{:.1}h ({:.0}%)\n",
        stats.completed_extracurricular_hours,
        stats.total_extracurricular_hours,
        metrics.extracurricular_progress
    ));
    out.push_str(&format!(
        "Balance:         {:.1}% extracurricular ({:?})\n",
        stats.balance_ratio, metrics.balance_status
    ));
    out.push_str(&format!("Annual goal:     {:.0}%\n", metrics.target_progress));

    out.push_str("\n## Upcoming deadlines\n\n");
    if stats.upcoming_deadlines.is_empty() {
        out.push_str("- none in the next week\n");
    }
    for t in stats.upcoming_deadlines.iter().take(upcoming_limit) {
        out.push_str(&format!("- {} {} ({})\n", t.deadline, t.name, priority_label(t.priority)));
    }
    let hidden = stats.upcoming_deadlines.len().saturating_sub(upcoming_limit);
    if hidden > 0 {
        out.push_str(&format!("- ... and {hidden} more\n"));
    }
    out
}

pub fn suggestions(suggestions: &[Suggestion]) -> String {
    if suggestions.is_empty() {
        return "No suggestions. Add some tasks first.\n".to_string();
    }
    let mut out = String::new();
    for s in suggestions {
        let marker = match s.severity {
            Severity::Warning => "!",
            Severity::Info => "i",
            Severity::Success => "+",
        };
        out.push_str(&format!("[{marker}] {}\n    {}\n", s.title, s.message));
        if let Some(action) = &s.action {
            out.push_str(&format!("    -> {action}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use studyplan_core::{calculate_progress, generate_schedule, StudentPreferences, TargetProgressMode, TimePreference};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn night_slots_show_wall_clock_with_day_marker() {
        let prefs = StudentPreferences {
            preferred_study_time: TimePreference::Night,
            ..Default::default()
        };
        let tasks = vec![
            Task::academic("a", "Reading", "Biology", 3, date(20)).with_hours(3.0),
            Task::academic("b", "Notes", "Biology", 3, date(21)).with_hours(1.0),
        ];
        let text = schedule(&generate_schedule(&tasks, &prefs), date(19));

        assert!(text.contains("- 22:00-01:00 (+1d) ACA Reading"));
        assert!(text.contains("- 01:00 (+1d)-02:00 (+1d) ACA Notes"));
        assert!(text.contains("## Sunday 2026-10-25\n- (free)"));
    }

    #[test]
    fn progress_truncates_upcoming_list() {
        let tasks: Vec<Task> = (0..4)
            .map(|i| Task::academic(format!("t{i}"), format!("Quiz {i}"), "Math", 1, date(20 + i)))
            .collect();
        let stats = calculate_progress(&tasks, date(19));
        let metrics = DashboardMetrics::from_stats(&stats, 400.0, TargetProgressMode::CompletedOnly);

        let text = progress(&stats, &metrics, 2);
        assert!(text.contains("Quiz 0"));
        assert!(text.contains("Quiz 1"));
        assert!(!text.contains("Quiz 2"));
        assert!(text.contains("and 2 more"));
    }

    #[test]
    fn task_list_marks_completed() {
        let mut set = TaskSet::new();
        set.add(Task::extracurricular("e", "Match", "Soccer", date(22)).with_completed(true)).unwrap();
        let text = task_list(&set);
        assert!(text.starts_with("Tasks: 1 (0 active)"));
        assert!(text.contains("[x] EXT Match | Soccer (e)"));
    }
}
