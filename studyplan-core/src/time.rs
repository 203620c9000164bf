//! Time utilities: weekdays, clock times and the preferred study windows.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Canonical weekday, serialized by its full English name ("Monday").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeekDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekDay {
    /// Monday → Sunday.
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
        WeekDay::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WeekDay::Monday => "Monday",
            WeekDay::Tuesday => "Tuesday",
            WeekDay::Wednesday => "Wednesday",
            WeekDay::Thursday => "Thursday",
            WeekDay::Friday => "Friday",
            WeekDay::Saturday => "Saturday",
            WeekDay::Sunday => "Sunday",
        }
    }

    /// 0 for Monday, 6 for Sunday.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Calendar date of this weekday in the week starting at `week_start`.
    pub fn date_in_week(&self, week_start: NaiveDate) -> NaiveDate {
        week_start + Duration::days(self.index() as i64)
    }
}

impl From<Weekday> for WeekDay {
    fn from(w: Weekday) -> Self {
        WeekDay::ALL[w.num_days_from_monday() as usize]
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// A clock time as minutes since the day's midnight.
///
/// Values past 24:00 are allowed: a slot that runs over midnight keeps
/// counting ("25:30") instead of wrapping, so slots on one day always sort
/// and compare correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u32);

impl ClockTime {
    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    pub const fn hm(hours: u32, minutes: u32) -> Self {
        Self(hours * 60 + minutes)
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    /// Saturates at the largest representable time.
    pub fn plus_minutes(&self, minutes: u32) -> Self {
        Self(self.0.saturating_add(minutes))
    }

    /// The same time folded into 00:00..24:00, for wall-clock display.
    pub fn wall_clock(&self) -> Self {
        Self(self.0 % (24 * 60))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ValidationError::Clock(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(bad)?;
        if h.is_empty() || m.len() != 2 {
            return Err(bad());
        }
        let h: u32 = h.parse().map_err(|_| bad())?;
        let m: u32 = m.parse().map_err(|_| bad())?;
        if m >= 60 {
            return Err(bad());
        }
        let minutes = h.checked_mul(60).and_then(|v| v.checked_add(m)).ok_or_else(bad)?;
        Ok(Self(minutes))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Preferred day-part for study blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimePreference {
    #[default]
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimePreference {
    /// Canonical window as (start, nominal end). Night ends at 02:00 the next
    /// morning, expressed as 26:00.
    pub fn window(&self) -> (ClockTime, ClockTime) {
        match self {
            TimePreference::Morning => (ClockTime::hm(6, 0), ClockTime::hm(12, 0)),
            TimePreference::Afternoon => (ClockTime::hm(12, 0), ClockTime::hm(18, 0)),
            TimePreference::Evening => (ClockTime::hm(18, 0), ClockTime::hm(22, 0)),
            TimePreference::Night => (ClockTime::hm(22, 0), ClockTime::hm(26, 0)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimePreference::Morning => "Morning (6 AM - 12 PM)",
            TimePreference::Afternoon => "Afternoon (12 PM - 6 PM)",
            TimePreference::Evening => "Evening (6 PM - 10 PM)",
            TimePreference::Night => "Night (10 PM - 2 AM)",
        }
    }
}

impl FromStr for TimePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(TimePreference::Morning),
            "afternoon" => Ok(TimePreference::Afternoon),
            "evening" => Ok(TimePreference::Evening),
            "night" => Ok(TimePreference::Night),
            other => Err(format!(
                "unknown study time '{other}' (morning, afternoon, evening, night)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_formats_and_parses() {
        let t = ClockTime::hm(6, 30);
        assert_eq!(t.to_string(), "06:30");
        assert_eq!("06:30".parse::<ClockTime>().unwrap(), t);
        assert_eq!("25:15".parse::<ClockTime>().unwrap().to_string(), "25:15");
        assert_eq!(ClockTime::hm(25, 15).wall_clock().to_string(), "01:15");
    }

    #[test]
    fn plus_minutes_saturates() {
        let late = ClockTime::from_minutes(u32::MAX - 10);
        assert_eq!(late.plus_minutes(60).minutes(), u32::MAX);
        assert_eq!(ClockTime::hm(6, 0).plus_minutes(90), ClockTime::hm(7, 30));
    }

    #[test]
    fn clock_time_rejects_garbage() {
        for bad in ["", "6", "06:7", "ab:cd", "10:60", ":30"] {
            assert!(bad.parse::<ClockTime>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn clock_time_serializes_as_string() {
        let json = serde_json::to_string(&ClockTime::hm(18, 0)).unwrap();
        assert_eq!(json, "\"18:00\"");
        let back: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ClockTime::hm(18, 0));
    }

    #[test]
    fn week_start_is_monday() {
        // 2026-10-19 is a Monday.
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let thursday = NaiveDate::from_ymd_opt(2026, 10, 22).unwrap();
        assert_eq!(week_start(thursday), monday);
        assert_eq!(week_start(monday), monday);
        assert_eq!(WeekDay::Sunday.date_in_week(monday).day(), 25);
        assert_eq!(WeekDay::from(thursday.weekday()), WeekDay::Thursday);
    }

    #[test]
    fn night_window_runs_past_midnight() {
        let (start, end) = TimePreference::Night.window();
        assert_eq!(start.to_string(), "22:00");
        assert_eq!(end.wall_clock().to_string(), "02:00");
        assert!(end > start);
    }

    #[test]
    fn weekday_serializes_full_name() {
        assert_eq!(serde_json::to_string(&WeekDay::Wednesday).unwrap(), "\"Wednesday\"");
        assert_eq!(
            serde_json::to_string(&TimePreference::Afternoon).unwrap(),
            "\"afternoon\""
        );
    }
}
