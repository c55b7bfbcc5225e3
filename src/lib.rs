//! duke - line-oriented task tracking assistant.
//!
//! This library contains the command interpreter, the task model and the
//! storage used by the `duke` binary.

pub mod cli;
pub mod core;
