use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use studyplan_core::{ScheduleEntry, TaskCategory};

/// One CSV row per scheduled block.
#[derive(Debug, Serialize)]
struct Row<'a> {
    date: String,
    day: &'static str,
    start: String,
    end: String,
    task_id: &'a str,
    name: &'a str,
    category: &'static str,
    detail: &'a str,
    hours: f64,
}

impl<'a> Row<'a> {
    fn from_entry(entry: &'a ScheduleEntry) -> Self {
        let task = &entry.task;
        Self {
            date: task
                .scheduled_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            day: entry.day.name(),
            start: entry.start_time.to_string(),
            end: entry.end_time.to_string(),
            task_id: &task.id,
            name: &task.name,
            category: match task.category() {
                TaskCategory::Academic => "academic",
                TaskCategory::Extracurricular => "extracurricular",
            },
            detail: task.kind.detail(),
            hours: task.hours_required,
        }
    }
}

pub fn write_schedule_csv<W: Write>(out: W, schedule: &[ScheduleEntry]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for entry in schedule {
        wtr.serialize(Row::from_entry(entry))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_schedule_csv(path: &Path, schedule: &[ScheduleEntry]) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_schedule_csv(file, schedule).with_context(|| format!("write {}", path.display()))
}
