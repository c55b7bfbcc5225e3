//! Task file persistence.
//!
//! The file holds one rendered task per line, exactly as `list` shows
//! them without the position prefix.

use crate::core::error::{DukeError, Result};
use crate::core::task::Task;
use crate::core::task_list::TaskList;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Reads and writes the task list at a fixed path.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Create storage for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the task file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved list. A missing file yields an empty list.
    pub fn load(&self) -> Result<TaskList> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no task file, starting empty");
            return Ok(TaskList::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let tasks = parse(&content)?;
        info!(path = %self.path.display(), count = tasks.size(), "tasks loaded");
        Ok(tasks)
    }

    /// Replace the file with the current list.
    ///
    /// The list is written to a temporary file next to the target and then
    /// renamed over it, so the old file stays intact if anything fails.
    pub fn save(&self, tasks: &TaskList) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut staged = NamedTempFile::new_in(parent)?;
        staged.write_all(serialize(tasks).as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|e| e.error)?;
        info!(path = %self.path.display(), count = tasks.size(), "tasks saved");
        Ok(())
    }
}

/// Parse task file content. Blank lines are skipped.
pub fn parse(content: &str) -> Result<TaskList> {
    content
        .lines()
        .enumerate()
        .filter(|(_, record)| !record.trim().is_empty())
        .map(|(i, record)| {
            Task::from_record(record).ok_or_else(|| DukeError::CorruptRecord {
                line: i + 1,
                record: record.to_string(),
            })
        })
        .collect()
}

/// One rendered task per line.
pub fn serialize(tasks: &TaskList) -> String {
    tasks
        .all()
        .iter()
        .map(|task| format!("{task}\n"))
        .collect()
}
