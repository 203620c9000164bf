//! Student preferences supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::{ClockTime, TimePreference, WeekDay};

/// A free-time window on one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub day: WeekDay,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

impl TimeSlot {
    pub fn new(day: WeekDay, start_time: ClockTime, end_time: ClockTime) -> Result<Self, ValidationError> {
        let slot = Self {
            day,
            start_time,
            end_time,
        };
        slot.validate()?;
        Ok(slot)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.end_time <= self.start_time {
            return Err(ValidationError::SlotOrder {
                day: self.day.to_string(),
                start: self.start_time.to_string(),
                end: self.end_time.to_string(),
            });
        }
        Ok(())
    }

    pub fn hours(&self) -> f64 {
        f64::from(self.end_time.minutes() - self.start_time.minutes()) / 60.0
    }
}

/// Scheduling preferences.
///
/// `free_time_slots` are recorded but the allocator does not consult them;
/// `target_extracurricular_hours` only feeds dashboard ratios and the goal
/// pace suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentPreferences {
    pub max_study_hours_per_day: f64,
    pub preferred_study_time: TimePreference,
    #[serde(default)]
    pub free_time_slots: Vec<TimeSlot>,
    pub target_extracurricular_hours: f64,
}

impl Default for StudentPreferences {
    fn default() -> Self {
        Self {
            max_study_hours_per_day: 8.0,
            preferred_study_time: TimePreference::Morning,
            free_time_slots: Vec::new(),
            target_extracurricular_hours: 400.0,
        }
    }
}

impl StudentPreferences {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let max = self.max_study_hours_per_day;
        if !(max.is_finite() && max >= 0.0) {
            return Err(ValidationError::MaxHours(max));
        }
        let target = self.target_extracurricular_hours;
        if !(target.is_finite() && target >= 0.0) {
            return Err(ValidationError::TargetHours(target));
        }
        for slot in &self.free_time_slots {
            slot.validate()?;
        }
        Ok(())
    }

    /// Daily capacity used by the allocator. Invalid values count as zero.
    pub(crate) fn daily_capacity(&self) -> f64 {
        let max = self.max_study_hours_per_day;
        if max.is_finite() && max > 0.0 { max } else { 0.0 }
    }
}
