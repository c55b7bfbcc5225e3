//! Command interpreter for the duke task tracker.
//!
//! Each input line is dispatched on its first whitespace-delimited token to
//! a registered handler. Handlers validate everything before touching the
//! list, so a failed command leaves the list exactly as it was.

use crate::core::error::{DukeError, IndexAction, IndexFault, Result};
use crate::core::task::{Task, TaskKind};
use crate::core::task_list::TaskList;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Message shown when the session ends.
pub const FAREWELL: &str = "Bye. Hope to see you again soon!";

/// Prefix of every failure response.
pub const FAILURE_PREFIX: &str = "☹ OOPS!!!";

/// Result of a successfully interpreted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text for the user. `modified` is set when the list changed.
    Reply { message: String, modified: bool },
    /// The session should end.
    Exit,
}

/// How a line was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Modified,
    /// Rejected; carries the error code.
    Failed(&'static str),
    Exit,
}

/// Display-ready answer to one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub status: Status,
}

impl Response {
    /// Whether the session should end after showing this response.
    pub fn is_exit(&self) -> bool {
        self.status == Status::Exit
    }
}

/// Uniform contract implemented by every command.
trait CommandHandler {
    fn handle(&self, line: &str, tasks: &mut TaskList) -> Result<Outcome>;
}

/// `bye`: ends the session.
struct Bye;

impl CommandHandler for Bye {
    fn handle(&self, line: &str, _tasks: &mut TaskList) -> Result<Outcome> {
        require_exact(line, "bye")?;
        Ok(Outcome::Exit)
    }
}

/// `list`: enumerates every task.
struct List;

impl CommandHandler for List {
    fn handle(&self, line: &str, tasks: &mut TaskList) -> Result<Outcome> {
        require_exact(line, "list")?;

        let mut message = String::from("Here are the tasks in your list:");
        for (position, task) in tasks.all().iter().enumerate() {
            message.push_str(&format!("\n{}.{task}", position + 1));
        }

        Ok(Outcome::Reply {
            message,
            modified: false,
        })
    }
}

/// `todo`, `deadline` and `event`.
struct AddTask {
    kind: TaskKind,
}

impl CommandHandler for AddTask {
    fn handle(&self, line: &str, tasks: &mut TaskList) -> Result<Outcome> {
        let task = match self.kind.date_flag() {
            None => {
                let rest = arguments(line, self.kind.keyword());
                let description = rest.strip_prefix(char::is_whitespace).unwrap_or(rest);
                Task::create(self.kind, description, None)?
            }
            Some(flag) => {
                let rest = line
                    .split_once(self.kind.keyword())
                    .map(|(_, rest)| rest)
                    .unwrap_or_default();

                match rest.split_once(flag) {
                    Some((description, when)) => {
                        Task::create(self.kind, description.trim(), Some(when))?
                    }
                    None => Task::create(self.kind, rest.trim(), None)?,
                }
            }
        };

        let rendered = task.render();
        let size = tasks.add(task);
        info!(kind = %self.kind, size, "task added");

        Ok(Outcome::Reply {
            message: format!(
                "Got it. I've added this task:\n{rendered}\nNow you have {size} tasks in this list."
            ),
            modified: true,
        })
    }
}

/// `mark` and `unmark`.
struct SetDone {
    done: bool,
}

impl CommandHandler for SetDone {
    fn handle(&self, line: &str, tasks: &mut TaskList) -> Result<Outcome> {
        let (keyword, action) = if self.done {
            ("mark", IndexAction::Mark)
        } else {
            ("unmark", IndexAction::Unmark)
        };

        let index = parse_index(arguments(line, keyword), action)?;
        let task = tasks
            .get_mut(index)
            .map_err(|fault| DukeError::InvalidIndex { action, fault })?;

        let message = if self.done {
            task.mark_done();
            format!("Nice! I've marked this task as done:\n{task}")
        } else {
            task.mark_undone();
            format!("OK, I've marked this task as not done yet:\n{task}")
        };
        info!(index, done = self.done, "task updated");

        Ok(Outcome::Reply {
            message,
            modified: true,
        })
    }
}

/// `delete`.
struct Delete;

impl CommandHandler for Delete {
    fn handle(&self, line: &str, tasks: &mut TaskList) -> Result<Outcome> {
        let action = IndexAction::Delete;
        let index = parse_index(arguments(line, "delete"), action)?;
        let task = tasks
            .remove(index)
            .map_err(|fault| DukeError::InvalidIndex { action, fault })?;
        let size = tasks.size();
        info!(index, size, "task deleted");

        Ok(Outcome::Reply {
            message: format!(
                "Noted. I've removed this task:\n{task}\nNow you have {size} tasks in the list."
            ),
            modified: true,
        })
    }
}

/// Text following the command keyword.
fn arguments<'a>(line: &'a str, keyword: &str) -> &'a str {
    line.strip_prefix(keyword).unwrap_or_default()
}

fn require_exact(line: &str, keyword: &str) -> Result<()> {
    if line == keyword {
        Ok(())
    } else {
        Err(DukeError::UnknownCommand(line.to_string()))
    }
}

fn parse_index(raw: &str, action: IndexAction) -> Result<usize> {
    let raw = raw.trim();
    raw.parse::<usize>().map_err(|_| DukeError::InvalidIndex {
        action,
        fault: IndexFault::Malformed(raw.to_string()),
    })
}

/// Maps command keywords to their handlers.
pub struct Interpreter {
    handlers: HashMap<&'static str, Box<dyn CommandHandler>>,
}

impl Interpreter {
    /// Create an interpreter with every built-in command registered.
    pub fn new() -> Self {
        let mut interpreter = Self {
            handlers: HashMap::new(),
        };

        interpreter.register("bye", Bye);
        interpreter.register("list", List);
        for kind in [TaskKind::Todo, TaskKind::Deadline, TaskKind::Event] {
            interpreter.register(kind.keyword(), AddTask { kind });
        }
        interpreter.register("mark", SetDone { done: true });
        interpreter.register("unmark", SetDone { done: false });
        interpreter.register("delete", Delete);

        interpreter
    }

    fn register(&mut self, keyword: &'static str, handler: impl CommandHandler + 'static) {
        self.handlers.insert(keyword, Box::new(handler));
    }

    /// Interpret one line against the list.
    pub fn interpret(&self, line: &str, tasks: &mut TaskList) -> Result<Outcome> {
        let keyword = line.split(char::is_whitespace).next().unwrap_or_default();
        debug!(keyword, "dispatching command");

        let handler = self
            .handlers
            .get(keyword)
            .ok_or_else(|| DukeError::UnknownCommand(line.to_string()))?;
        handler.handle(line, tasks)
    }

    /// Interpret one line and turn any failure into a user-facing response.
    pub fn respond(&self, line: &str, tasks: &mut TaskList) -> Response {
        match self.interpret(line, tasks) {
            Ok(Outcome::Reply { message, modified }) => Response {
                text: message,
                status: if modified { Status::Modified } else { Status::Ok },
            },
            Ok(Outcome::Exit) => Response {
                text: FAREWELL.to_string(),
                status: Status::Exit,
            },
            Err(e) => {
                warn!(code = e.error_code(), error = ?e, "command rejected");
                Response {
                    text: format!("{FAILURE_PREFIX} {e}"),
                    status: Status::Failed(e.error_code()),
                }
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
