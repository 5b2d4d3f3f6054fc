//! Error types for task operations and the task file.

use std::io;
use std::path::PathBuf;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, TaskError>;

/// Errors raised by store operations and input validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaskError {
    /// Priority choice is not one of `0`, `1`, `2`.
    #[error("Invalid priority choice '{0}'. Choose 0: Low, 1: Medium, 2: High")]
    InvalidPriority(String),

    /// Task id input is not a positive integer.
    #[error("Invalid task ID '{0}'. Please enter a valid ID")]
    InvalidId(String),

    /// Description contains a character the task file cannot hold.
    #[error("Description cannot contain a comma or line break: '{0}'")]
    InvalidDescription(String),

    /// Every id up to the maximum has been handed out.
    #[error("No task IDs left to assign")]
    IdsExhausted,

    /// No task has this id.
    #[error("Task {0} not found")]
    NotFound(u64),
}

/// A single field of a task record that failed to decode.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("id '{0}' is not a positive integer")]
    InvalidId(String),

    #[error("completed flag '{0}' is not true or false")]
    InvalidCompleted(String),

    #[error("unknown priority '{0}'")]
    UnknownPriority(String),
}

/// A line of the task file that was skipped while loading.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MalformedRecord {
    #[error("Invalid task format on line {line_no} ({found} fields, expected 4): {line}")]
    FieldCount {
        line_no: usize,
        line: String,
        found: usize,
    },

    #[error("Error parsing line {line_no}: {line}. Details: {source}")]
    Field {
        line_no: usize,
        line: String,
        source: FieldError,
    },

    #[error("Line {line_no} is not valid UTF-8: {line}")]
    Encoding { line_no: usize, line: String },

    #[error("Duplicate task ID {id} on line {line_no}: {line}")]
    DuplicateId {
        line_no: usize,
        line: String,
        id: u64,
    },
}

/// Failure to read or write the task file.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
