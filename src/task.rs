//! Task data structure.
//!
//! A `Task` is a single to-do item. Tasks are only created through
//! [`TaskStore::add`](crate::store::TaskStore::add) or decoded from the task file.

use std::fmt;

use crate::fields::Priority;

/// Largest id a task may carry, so `max + 1` always fits.
pub const MAX_TASK_ID: u64 = i64::MAX as u64;

/// A unit of work with an id, description, completion flag and priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
}

impl Task {
    /// A new pending task.
    pub fn new(id: u64, description: impl Into<String>, priority: Priority) -> Self {
        Task {
            id,
            description: description.into(),
            completed: false,
            priority,
        }
    }

    /// Human-readable status.
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else {
            "Pending"
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Description: {}, Priority: {}, Status: {}",
            self.id,
            self.description,
            self.priority,
            self.status_label()
        )
    }
}
