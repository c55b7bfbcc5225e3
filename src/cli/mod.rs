//! Terminal front end for the duke task tracker.

pub mod output;

use crate::core::{Interpreter, Status, Storage, TaskList};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, error};

/// duke - line-oriented task tracker
#[derive(Parser, Debug)]
#[command(name = "duke")]
#[command(about = "Track todos, deadlines and events one command per line", long_about = None)]
pub struct Cli {
    /// Task file to load at start and save after every change
    #[arg(short, long, default_value = "data/duke.txt")]
    pub file: PathBuf,

    /// Keep the session in memory only
    #[arg(long)]
    pub no_save: bool,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let stdin = io::stdin();
    let stdout = io::stdout();
    session(&cli, stdin.lock(), stdout.lock())
}

/// Serve commands from `input` until `bye` or end of input.
pub fn session<R: BufRead, W: Write>(cli: &Cli, input: R, mut out: W) -> Result<()> {
    let storage = Storage::new(cli.file.clone());
    let mut tasks: TaskList = storage
        .load()
        .with_context(|| {
            let path = storage.path().display();
            format!("Failed to load tasks from {path}")
        })?;
    let interpreter = Interpreter::new();

    let greeting = output::format_greeting();
    write!(out, "{greeting}")?;
    out.flush()?;

    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        let line = line.trim_end_matches('\r');

        let response = interpreter.respond(line, &mut tasks);
        let framed = output::format_response(&response.text);
        write!(out, "{framed}")?;
        out.flush()?;

        match response.status {
            Status::Exit => return Ok(()),
            Status::Modified if !cli.no_save => {
                // A failed save is reported but the session keeps running.
                if let Err(e) = storage.save(&tasks) {
                    error!(error = %e, "save failed");
                    let framed = output::format_response(&format!("Could not save tasks: {e}"));
                    write!(out, "{framed}")?;
                }
            }
            _ => {}
        }
    }

    debug!("input closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn cli_for(temp: &TempDir, extra: &[&str]) -> Cli {
        let file = temp.path().join("tasks.txt");
        let mut args = vec!["duke", "--file", file.to_str().unwrap()];
        args.extend_from_slice(extra);
        Cli::parse_from(args)
    }

    fn drive(cli: &Cli, script: &str) -> String {
        let mut out = Vec::new();
        session(cli, Cursor::new(script.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_default_file() {
        let cli = Cli::parse_from(["duke"]);
        assert_eq!(cli.file, PathBuf::from("data/duke.txt"));
        assert!(!cli.no_save);
    }

    #[test]
    fn test_session_saves_changes() {
        let temp = TempDir::new().unwrap();
        let cli = cli_for(&temp, &[]);

        let transcript = drive(&cli, "todo A\r\nmark 1\nbye\ntodo ignored\n");
        assert!(transcript.contains("Nice! I've marked this task as done:\n[T][X] A"));
        assert!(transcript.contains("Bye. Hope to see you again soon!"));

        let saved = std::fs::read_to_string(&cli.file).unwrap();
        assert_eq!(saved, "[T][X] A\n");
    }

    #[test]
    fn test_session_resumes_saved_list() {
        let temp = TempDir::new().unwrap();
        let cli = cli_for(&temp, &[]);

        drive(&cli, "todo A\ntodo B\n");
        let transcript = drive(&cli, "delete 1\nlist\n");
        assert!(transcript.contains("Here are the tasks in your list:\n1.[T][ ] B"));
    }

    #[test]
    fn test_no_save() {
        let temp = TempDir::new().unwrap();
        let cli = cli_for(&temp, &["--no-save"]);

        drive(&cli, "todo A\nbye\n");
        assert!(!cli.file.exists());
    }

    #[test]
    fn test_corrupt_file_fails_to_start() {
        let temp = TempDir::new().unwrap();
        let cli = cli_for(&temp, &[]);
        std::fs::write(&cli.file, "garbage\n").unwrap();

        let mut out = Vec::new();
        let err = session(&cli, Cursor::new(String::new()), &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("Corrupted task record on line 1"));
    }
}
