//! Ordered task collection addressed by 1-based position.

use crate::core::error::IndexFault;
use crate::core::task::Task;

/// Tasks in insertion order. Position `n` (1-based) is the `n`th task shown
/// by `list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task and return the new size.
    pub fn add(&mut self, task: Task) -> usize {
        self.tasks.push(task);
        self.tasks.len()
    }

    /// Task at a 1-based position.
    pub fn get(&self, index: usize) -> Result<&Task, IndexFault> {
        let slot = self.slot(index)?;
        Ok(&self.tasks[slot])
    }

    /// Mutable task at a 1-based position.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Task, IndexFault> {
        let slot = self.slot(index)?;
        Ok(&mut self.tasks[slot])
    }

    /// Remove and return the task at a 1-based position.
    pub fn remove(&mut self, index: usize) -> Result<Task, IndexFault> {
        let slot = self.slot(index)?;
        Ok(self.tasks.remove(slot))
    }

    /// Number of tasks.
    pub fn size(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the list has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Read-only view in insertion order.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    fn slot(&self, index: usize) -> Result<usize, IndexFault> {
        if index == 0 || index > self.tasks.len() {
            return Err(IndexFault::OutOfRange {
                index,
                size: self.tasks.len(),
            });
        }
        Ok(index - 1)
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}
