//! Validation errors raised at the domain-model boundary.
//!
//! The engine itself is total; these only surface when a caller builds or
//! loads records that break the model's invariants.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("priority must be 1..=5, got {0}")]
    Priority(u8),

    #[error("hours required must be a positive number of at most 168, got {0}")]
    Hours(f64),

    #[error("{field} must be non-empty")]
    Empty { field: &'static str },

    #[error("max study hours per day must be a finite, non-negative number, got {0}")]
    MaxHours(f64),

    #[error("target extracurricular hours must be a finite, non-negative number, got {0}")]
    TargetHours(f64),

    #[error("invalid clock time '{0}' (expected HH:MM)")]
    Clock(String),

    #[error("time slot on {day} must end after it starts ({start} - {end})")]
    SlotOrder {
        day: String,
        start: String,
        end: String,
    },

    #[error("task id '{0}' already exists")]
    DuplicateId(String),
}
