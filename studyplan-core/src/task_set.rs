//! The caller's task collection as an ordered snapshot.
//!
//! Holds tasks in insertion order (the allocator's final tie-break depends on
//! it) and offers the only mutations the model allows: add, toggle
//! completion, delete. Engine functions take `as_slice()`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::task::{Priority, Task, TaskKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TaskSet {
    tasks: Vec<Task>,
}

// Loading goes through the same checks as `add`.
impl<'de> Deserialize<'de> for TaskSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tasks = Vec::<Task>::deserialize(deserializer)?;
        TaskSet::from_tasks(tasks).map_err(serde::de::Error::custom)
    }
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored tasks, validating each one.
    pub fn from_tasks(tasks: Vec<Task>) -> Result<Self, ValidationError> {
        let mut set = Self::new();
        for t in tasks {
            set.add(t)?;
        }
        Ok(set)
    }

    /// Fresh opaque identifier for a new task.
    pub fn next_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    /// Append a validated task. Ids must be unique.
    pub fn add(&mut self, task: Task) -> Result<(), ValidationError> {
        task.validate()?;
        if self.get(&task.id).is_some() {
            return Err(ValidationError::DuplicateId(task.id));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Create and append a task with a fresh id. Returns the id.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        kind: TaskKind,
        hours: f64,
        priority: Priority,
        deadline: NaiveDate,
    ) -> Result<String, ValidationError> {
        let id = Self::next_id();
        let task = Task::new(id.clone(), name, kind, deadline)
            .with_hours(hours)
            .with_priority(priority);
        self.add(task)?;
        Ok(id)
    }

    /// Flip the completion flag. Returns the new state, `None` if unknown.
    pub fn toggle_completion(&mut self, id: &str) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(idx))
    }

    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    /// Incomplete tasks first, then priority DESC; insertion order otherwise.
    pub fn display_order(&self) -> Vec<&Task> {
        let mut out: Vec<&Task> = self.tasks.iter().collect();
        out.sort_by(|a, b| {
            a.completed
                .cmp(&b.completed)
                .then_with(|| b.priority.cmp(&a.priority))
        });
        out
    }
}
