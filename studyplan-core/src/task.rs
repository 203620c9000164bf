//! Task model: academic and extracurricular obligations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::ClockTime;

/// Which side of the balance a task counts toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Academic,
    Extracurricular,
}

/// Category-specific fields. Serialized inline with a `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TaskKind {
    Academic { subject: String, credits: u32 },
    Extracurricular { activity: String },
}

impl TaskKind {
    pub fn category(&self) -> TaskCategory {
        match self {
            TaskKind::Academic { .. } => TaskCategory::Academic,
            TaskKind::Extracurricular { .. } => TaskCategory::Extracurricular,
        }
    }

    /// Subject for academic tasks, activity for extracurricular ones.
    pub fn detail(&self) -> &str {
        match self {
            TaskKind::Academic { subject, .. } => subject,
            TaskKind::Extracurricular { activity } => activity,
        }
    }
}

/// Priority level 1..=5, 5 being the most important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const LOW: Priority = Priority(1);
    pub const CRITICAL: Priority = Priority(5);

    pub fn new(level: u8) -> Result<Self, ValidationError> {
        if (1..=5).contains(&level) {
            Ok(Self(level))
        } else {
            Err(ValidationError::Priority(level))
        }
    }

    pub fn level(&self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for Priority {
    type Error = ValidationError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> Self {
        p.0
    }
}

/// Upper bound on a single task's estimate: one full week.
pub const MAX_TASK_HOURS: f64 = 24.0 * 7.0;

/// Core task type.
///
/// `scheduled_date` / `scheduled_time` are hints written by the allocator on
/// the copies it returns; they are never authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,

    #[serde(flatten)]
    pub kind: TaskKind,

    pub hours_required: f64,
    pub priority: Priority,
    pub deadline: NaiveDate,
    pub completed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<ClockTime>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: TaskKind,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            hours_required: 1.0,
            priority: Priority::default(),
            deadline,
            completed: false,
            scheduled_date: None,
            scheduled_time: None,
        }
    }

    pub fn academic(
        id: impl Into<String>,
        name: impl Into<String>,
        subject: impl Into<String>,
        credits: u32,
        deadline: NaiveDate,
    ) -> Self {
        let kind = TaskKind::Academic {
            subject: subject.into(),
            credits,
        };
        Self::new(id, name, kind, deadline)
    }

    pub fn extracurricular(
        id: impl Into<String>,
        name: impl Into<String>,
        activity: impl Into<String>,
        deadline: NaiveDate,
    ) -> Self {
        let kind = TaskKind::Extracurricular {
            activity: activity.into(),
        };
        Self::new(id, name, kind, deadline)
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.hours_required = hours;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn category(&self) -> TaskCategory {
        self.kind.category()
    }

    /// Minimal invariants for safe processing by the engine.
    ///
    /// Hours must be positive and at most [`MAX_TASK_HOURS`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::Empty { field: "id" });
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        let hours = self.hours_required;
        if !(hours.is_finite() && hours > 0.0 && hours <= MAX_TASK_HOURS) {
            return Err(ValidationError::Hours(hours));
        }
        match &self.kind {
            TaskKind::Academic { subject, .. } if subject.trim().is_empty() => {
                Err(ValidationError::Empty { field: "subject" })
            }
            TaskKind::Extracurricular { activity } if activity.trim().is_empty() => {
                Err(ValidationError::Empty { field: "activity" })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn priority_rejects_out_of_range() {
        assert!(Priority::new(0).is_err());
        assert!(Priority::new(6).is_err());
        assert_eq!(Priority::new(5).unwrap(), Priority::CRITICAL);
        assert!(serde_json::from_str::<Priority>("9").is_err());
    }

    #[test]
    fn task_json_carries_type_tag_and_category_fields() {
        let t = Task::academic("t1", "Problem set 3", "Linear Algebra", 4, date(23))
            .with_hours(2.5)
            .with_priority(Priority::new(4).unwrap());

        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"type\":\"academic\""));
        assert!(json.contains("\"subject\":\"Linear Algebra\""));
        assert!(json.contains("\"credits\":4"));
        assert!(json.contains("\"deadline\":\"2026-10-23\""));
        assert!(!json.contains("activity"));
        assert!(!json.contains("scheduled_time"));

        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn extracurricular_detail_is_activity() {
        let t = Task::extracurricular("e1", "Practice", "Debate club", date(21));
        assert_eq!(t.category(), TaskCategory::Extracurricular);
        assert_eq!(t.kind.detail(), "Debate club");
    }

    #[test]
    fn validate_catches_bad_hours_and_missing_fields() {
        let ok = Task::academic("t1", "Essay", "History", 3, date(20)).with_hours(1.5);
        assert!(ok.validate().is_ok());

        assert_eq!(
            ok.clone().with_hours(0.0).validate(),
            Err(ValidationError::Hours(0.0))
        );
        assert!(ok.clone().with_hours(f64::NAN).validate().is_err());
        assert!(ok.clone().with_hours(MAX_TASK_HOURS).validate().is_ok());
        assert_eq!(
            ok.clone().with_hours(1.0e8).validate(),
            Err(ValidationError::Hours(1.0e8))
        );

        let no_subject = Task::academic("t2", "Essay", " ", 3, date(20));
        assert_eq!(
            no_subject.validate(),
            Err(ValidationError::Empty { field: "subject" })
        );
    }

    #[test]
    fn task_without_category_field_is_rejected_on_load() {
        let json = r#"{"id":"x","name":"n","type":"academic","credits":3,
            "hours_required":1.0,"priority":3,"deadline":"2026-10-20","completed":false}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }
}
