//! Core business logic for the duke task tracker.
//!
//! Everything here is synchronous and in-memory apart from `storage`,
//! which the front end uses to restore and persist the list.

pub mod command;
pub mod error;
pub mod storage;
pub mod task;
pub mod task_list;

pub use command::{Interpreter, Outcome, Response, Status};
pub use error::{DukeError, IndexAction, IndexFault, Result};
pub use storage::Storage;
pub use task::{Task, TaskDetail, TaskKind};
pub use task_list::TaskList;
