//! Task model for the duke task tracker.
//!
//! A task is a description, a completion flag and, for deadlines and
//! events, one instant. `render` produces the canonical one-line form used
//! both in responses and in the task file.

use crate::core::error::{DukeError, Result};
use chrono::{NaiveDateTime, Timelike};
use std::fmt;

/// Accepted date-time grammar for `/by` and `/at` clauses.
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format of instants inside a rendered task.
pub const DISPLAY_FORMAT: &str = "%b %d %Y %I:%M:%S %p";

/// The three kinds of task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Todo,
    Deadline,
    Event,
}

impl TaskKind {
    /// Single-letter tag shown between the first pair of brackets.
    pub fn tag(self) -> char {
        match self {
            TaskKind::Todo => 'T',
            TaskKind::Deadline => 'D',
            TaskKind::Event => 'E',
        }
    }

    /// Inverse of [`TaskKind::tag`].
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "T" => Some(TaskKind::Todo),
            "D" => Some(TaskKind::Deadline),
            "E" => Some(TaskKind::Event),
            _ => None,
        }
    }

    /// Command keyword that creates this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            TaskKind::Todo => "todo",
            TaskKind::Deadline => "deadline",
            TaskKind::Event => "event",
        }
    }

    /// Separator introducing the date clause, if the kind has one.
    pub fn date_flag(self) -> Option<&'static str> {
        match self {
            TaskKind::Todo => None,
            TaskKind::Deadline => Some("/by"),
            TaskKind::Event => Some("/at"),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Kind-specific data of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskDetail {
    Todo,
    Deadline { by: NaiveDateTime },
    Event { at: NaiveDateTime },
}

impl TaskDetail {
    /// Kind this detail belongs to.
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskDetail::Todo => TaskKind::Todo,
            TaskDetail::Deadline { .. } => TaskKind::Deadline,
            TaskDetail::Event { .. } => TaskKind::Event,
        }
    }
}

/// A tracked task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    done: bool,
    detail: TaskDetail,
}

impl Task {
    /// Create a task of the requested kind.
    ///
    /// `when` is the raw date clause and is required for deadlines and
    /// events; it is ignored for todos.
    pub fn create(kind: TaskKind, description: &str, when: Option<&str>) -> Result<Self> {
        if description.trim().is_empty() {
            return Err(DukeError::EmptyDescription(kind));
        }

        let detail = match kind {
            TaskKind::Todo => TaskDetail::Todo,
            TaskKind::Deadline => TaskDetail::Deadline {
                by: parse_instant(kind, when)?,
            },
            TaskKind::Event => TaskDetail::Event {
                at: parse_instant(kind, when)?,
            },
        };

        Ok(Self {
            description: description.to_string(),
            done: false,
            detail,
        })
    }

    /// Rebuild a task from its rendered form.
    ///
    /// Returns `None` when the record is not something `render` produces.
    pub fn from_record(record: &str) -> Option<Self> {
        let rest = record.strip_prefix('[')?;
        let (tag, rest) = rest.split_once(']')?;
        let kind = TaskKind::from_tag(tag)?;

        let done = match rest.get(..3)? {
            "[X]" => true,
            "[ ]" => false,
            _ => return None,
        };
        let body = rest.get(3..)?.strip_prefix(' ')?;

        let (description, detail) = match kind {
            TaskKind::Todo => (body, TaskDetail::Todo),
            TaskKind::Deadline => {
                let (description, by) = split_record_instant(body, "by")?;
                (description, TaskDetail::Deadline { by })
            }
            TaskKind::Event => {
                let (description, at) = split_record_instant(body, "at")?;
                (description, TaskDetail::Event { at })
            }
        };

        if description.trim().is_empty() {
            return None;
        }

        Some(Self {
            description: description.to_string(),
            done,
            detail,
        })
    }

    /// Description as entered.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the task is marked done.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Kind of the task.
    pub fn kind(&self) -> TaskKind {
        self.detail.kind()
    }

    /// Kind-specific data, including the instant for deadlines and events.
    pub fn detail(&self) -> &TaskDetail {
        &self.detail
    }

    /// Mark the task as done. Repeated calls are a no-op.
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Mark the task as not done. Repeated calls are a no-op.
    pub fn mark_undone(&mut self) {
        self.done = false;
    }

    /// Canonical one-line form, e.g. `[D][ ] Return book (by: Dec 01 2019 06:00:00 PM)`.
    pub fn render(&self) -> String {
        let marker = if self.done { 'X' } else { ' ' };
        let tag = self.kind().tag();
        let head = format!("[{tag}][{marker}] {}", self.description);

        match &self.detail {
            TaskDetail::Todo => head,
            TaskDetail::Deadline { by } => {
                format!("{head} (by: {})", by.format(DISPLAY_FORMAT))
            }
            TaskDetail::Event { at } => {
                format!("{head} (at: {})", at.format(DISPLAY_FORMAT))
            }
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn parse_instant(kind: TaskKind, when: Option<&str>) -> Result<NaiveDateTime> {
    let raw = match when.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            return Err(DukeError::MissingDate {
                kind,
                flag: kind.date_flag().unwrap_or_default(),
            })
        }
    };

    if !matches_input_shape(raw) {
        return Err(DukeError::InvalidDate(kind));
    }

    let instant =
        NaiveDateTime::parse_from_str(raw, INPUT_FORMAT).map_err(|_| DukeError::InvalidDate(kind))?;

    // chrono encodes a `:60` leap second as an overflowing nanosecond field.
    if instant.nanosecond() >= 1_000_000_000 {
        return Err(DukeError::InvalidDate(kind));
    }

    Ok(instant)
}

/// Fixed-width `YYYY-MM-DDTHH:MM:SS`; chrono alone accepts short fields.
fn matches_input_shape(raw: &str) -> bool {
    const PATTERN: &[u8; 19] = b"dddd-dd-ddTdd:dd:dd";

    raw.len() == PATTERN.len()
        && raw
            .bytes()
            .zip(PATTERN.iter())
            .all(|(byte, &expected)| match expected {
                b'd' => byte.is_ascii_digit(),
                _ => byte == expected,
            })
}

fn split_record_instant<'a>(body: &'a str, label: &str) -> Option<(&'a str, NaiveDateTime)> {
    let marker = format!(" ({label}: ");
    let (description, instant) = body.strip_suffix(')')?.rsplit_once(marker.as_str())?;
    let instant = NaiveDateTime::parse_from_str(instant, DISPLAY_FORMAT).ok()?;
    Some((description, instant))
}
