//! Enumerations and field types for task management.
//!
//! Priorities are persisted by label, so the mapping between a variant and its
//! text lives in one table here rather than being derived from the variant name.

use std::fmt;

use crate::error::TaskError;

/// Priority classification for task importance, ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Variant/label pairs in ascending order. Index in this table is the menu choice.
static PRIORITY_LABELS: [(Priority, &str); 3] = [
    (Priority::Low, "Low"),
    (Priority::Medium, "Medium"),
    (Priority::High, "High"),
];

impl Priority {
    /// All priorities, lowest first.
    pub fn all() -> impl Iterator<Item = Priority> {
        PRIORITY_LABELS.iter().map(|(p, _)| *p)
    }

    /// The label written to the task file.
    pub fn label(self) -> &'static str {
        // Table rows follow declaration order.
        PRIORITY_LABELS[self as usize].1
    }

    /// Look a priority up by its exact label.
    pub fn from_label(label: &str) -> Option<Priority> {
        PRIORITY_LABELS
            .iter()
            .find(|(_, l)| *l == label)
            .map(|(p, _)| *p)
    }

    /// Map a menu choice (`0: Low, 1: Medium, 2: High`) to a priority.
    pub fn from_index(input: &str) -> Result<Priority, TaskError> {
        let trimmed = input.trim();
        trimmed
            .parse::<usize>()
            .ok()
            .and_then(|i| PRIORITY_LABELS.get(i))
            .map(|(p, _)| *p)
            .ok_or_else(|| TaskError::InvalidPriority(trimmed.to_string()))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        let all: Vec<Priority> = Priority::all().collect();
        assert_eq!(all, vec![Priority::Low, Priority::Medium, Priority::High]);
    }

    #[test]
    fn test_label_mapping_is_bidirectional() {
        for p in Priority::all() {
            assert_eq!(Priority::from_label(p.label()), Some(p));
        }
        assert_eq!(Priority::from_label("low"), None);
        assert_eq!(Priority::from_label("Urgent"), None);
        assert_eq!(Priority::from_label(""), None);
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Priority::from_index("0").unwrap(), Priority::Low);
        assert_eq!(Priority::from_index(" 1 ").unwrap(), Priority::Medium);
        assert_eq!(Priority::from_index("2").unwrap(), Priority::High);
        assert!(matches!(
            Priority::from_index("3"),
            Err(TaskError::InvalidPriority(ref s)) if s == "3"
        ));
        assert!(Priority::from_index("-1").is_err());
        assert!(Priority::from_index("high").is_err());
        assert!(Priority::from_index("").is_err());
    }
}
