use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use studyplan_core::TaskSet;
use tracing::info;

pub fn studyplan_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("STUDYPLAN_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".studyplan"))
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))
}

/// On-disk home of the task list and config.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn open() -> Result<Self> {
        Ok(Self::at(studyplan_home()?))
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.root.join("tasks.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn load_tasks(&self) -> Result<TaskSet> {
        let p = self.tasks_path();
        if !p.exists() {
            return Ok(TaskSet::new());
        }
        let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
        serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))
    }

    pub fn save_tasks(&self, tasks: &TaskSet) -> Result<()> {
        ensure_dir(&self.root)?;
        let p = self.tasks_path();
        let json = serde_json::to_string_pretty(tasks)?;
        fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
        info!(path = %p.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use studyplan_core::Task;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::at(dir.path().join("nested"));
        assert!(store.load_tasks().unwrap().is_empty());
    }

    #[test]
    fn tasks_survive_a_save_load_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::at(dir.path().join("home"));
        let deadline = NaiveDate::from_ymd_opt(2026, 10, 23).unwrap();

        let mut tasks = TaskSet::new();
        tasks.add(Task::academic("t1", "Lab report", "Chemistry", 4, deadline).with_hours(2.5)).unwrap();
        tasks.add(Task::extracurricular("t2", "Rehearsal", "Drama club", deadline)).unwrap();
        tasks.toggle_completion("t2");
        store.save_tasks(&tasks).unwrap();

        let loaded = store.load_tasks().unwrap();
        assert_eq!(loaded, tasks);
        assert!(loaded.get("t2").unwrap().completed);
    }

    #[test]
    fn corrupt_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::at(dir.path());
        fs::write(store.tasks_path(), "{not json").unwrap();

        let err = store.load_tasks().unwrap_err();
        assert!(format!("{err:#}").contains("tasks.json"));
    }
}
