//! Display helpers for priority levels.

use serde::{Deserialize, Serialize};

use crate::task::Priority;

/// Color category a renderer maps to its own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityColor {
    Muted,
    Secondary,
    Primary,
    Warning,
    Destructive,
}

impl PriorityColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityColor::Muted => "muted",
            PriorityColor::Secondary => "secondary",
            PriorityColor::Primary => "primary",
            PriorityColor::Warning => "warning",
            PriorityColor::Destructive => "destructive",
        }
    }
}

pub fn priority_color(priority: Priority) -> PriorityColor {
    match priority.level() {
        1 => PriorityColor::Muted,
        2 => PriorityColor::Secondary,
        3 => PriorityColor::Primary,
        4 => PriorityColor::Warning,
        _ => PriorityColor::Destructive,
    }
}

pub fn priority_label(priority: Priority) -> &'static str {
    match priority.level() {
        1 => "Low",
        2 => "Medium",
        3 => "High",
        4 => "Urgent",
        _ => "Critical",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_level_has_a_distinct_pair() {
        let pairs: Vec<(PriorityColor, &str)> = (1..=5)
            .map(|l| {
                let p = Priority::new(l).unwrap();
                (priority_color(p), priority_label(p))
            })
            .collect();

        assert_eq!(pairs[0], (PriorityColor::Muted, "Low"));
        assert_eq!(pairs[4], (PriorityColor::Destructive, "Critical"));
        for (i, a) in pairs.iter().enumerate() {
            for b in &pairs[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn color_names() {
        assert_eq!(priority_color(Priority::new(4).unwrap()).as_str(), "warning");
    }
}
