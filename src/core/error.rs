//! Error types for the duke task tracker.
//!
//! All errors that can occur while interpreting commands or touching the
//! task file are defined here.

use crate::core::task::TaskKind;
use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for convenience.
pub type Result<T> = std::result::Result<T, DukeError>;

/// Command that was handed a task number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexAction {
    Mark,
    Unmark,
    Delete,
}

impl fmt::Display for IndexAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexAction::Mark => {
                write!(f, "Sorry, I can't mark this as done if it does not exist :(")
            }
            IndexAction::Unmark => {
                write!(f, "Sorry, I can't mark this as undone if it does not exist")
            }
            IndexAction::Delete => write!(f, "I can't remove this if it does not exist"),
        }
    }
}

/// Why a task number was rejected. Only used for logging; users see the
/// same message either way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexFault {
    #[error("'{0}' is not a task number")]
    Malformed(String),

    #[error("task {index} is outside 1..={size}")]
    OutOfRange { index: usize, size: usize },
}

/// All errors that can occur in the duke application.
#[derive(Error, Debug)]
pub enum DukeError {
    /// Add command without a description.
    #[error("The description of a {0} cannot be empty.")]
    EmptyDescription(TaskKind),

    /// Deadline or event without its date clause.
    #[error("Please include a {flag} for your {kind}. E.g {flag} 2019-10-15T10:15:00.")]
    MissingDate { kind: TaskKind, flag: &'static str },

    /// Date clause that does not match `YYYY-MM-DDTHH:MM:SS`.
    #[error("Please input the {0} in yyyy-mm-ddTHours:Minute:Seconds format. E.g 2019-10-15T10:15:00")]
    InvalidDate(TaskKind),

    /// Non-numeric or out-of-range task number.
    #[error("{action}")]
    InvalidIndex {
        action: IndexAction,
        #[source]
        fault: IndexFault,
    },

    /// First token is not a known command.
    #[error("I'm sorry, but I don't know what that means :(")]
    UnknownCommand(String),

    /// Task file line that is not a rendered task.
    #[error("Corrupted task record on line {line}: {record}")]
    CorruptRecord { line: usize, record: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl DukeError {
    /// Returns the error kind reported alongside failed responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            DukeError::EmptyDescription(_)
            | DukeError::MissingDate { .. }
            | DukeError::InvalidDate(_) => "InvalidTask",
            DukeError::InvalidIndex { .. } => "InvalidIndex",
            DukeError::UnknownCommand(_) => "UnknownCommand",
            DukeError::CorruptRecord { .. } => "CorruptRecord",
            DukeError::Io(_) => "IoError",
        }
    }
}
