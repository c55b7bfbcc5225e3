//! Integration tests for the duke binary.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

const LINE: &str = "____________________________________________________________";

fn run_duke(script: &str, dir: &Path, args: &[&str]) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_duke"))
        .current_dir(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute duke");

    // The process may exit before consuming stdin (e.g. on a corrupt data
    // file), so a broken pipe here is not a harness failure.
    if let Err(e) = child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(script.as_bytes())
    {
        assert_eq!(
            e.kind(),
            std::io::ErrorKind::BrokenPipe,
            "Failed to write script: {e}"
        );
    }

    let output = child.wait_with_output().expect("Failed to wait for duke");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let status = output.status.code().unwrap_or(1);

    (stdout, stderr, status)
}

/// Response bodies with the divider lines stripped.
fn responses(stdout: &str) -> Vec<String> {
    stdout
        .split(LINE)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(str::to_string)
        .collect()
}

#[test]
fn test_scenario_list_two_tasks() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    let (stdout, _stderr, status) = run_duke(
        "todo Buy milk\ndeadline Return book /by 2019-12-01T18:00:00\nlist\nbye\n",
        dir,
        &[],
    );
    assert_eq!(status, 0);

    let replies = responses(&stdout);
    assert_eq!(replies[0], "Hello! I'm Duke\nWhat can I do for you?");
    assert_eq!(
        replies[3],
        "Here are the tasks in your list:\n\
         1.[T][ ] Buy milk\n\
         2.[D][ ] Return book (by: Dec 01 2019 06:00:00 PM)"
    );
    assert_eq!(replies[4], "Bye. Hope to see you again soon!");

    // Default task file lives under data/.
    let saved = std::fs::read_to_string(dir.join("data/duke.txt")).unwrap();
    assert_eq!(
        saved,
        "[T][ ] Buy milk\n[D][ ] Return book (by: Dec 01 2019 06:00:00 PM)\n"
    );
}

#[test]
fn test_failures_do_not_end_session() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    let (stdout, _stderr, status) = run_duke(
        "blah\ntodo\nmark 1\ndeadline Concert /by not-a-date\ntodo A\nlist\n",
        dir,
        &["--file", "tasks.txt"],
    );
    assert_eq!(status, 0);

    let replies = responses(&stdout);
    assert_eq!(
        replies[1],
        "☹ OOPS!!! I'm sorry, but I don't know what that means :("
    );
    assert_eq!(
        replies[2],
        "☹ OOPS!!! The description of a todo cannot be empty."
    );
    assert_eq!(
        replies[3],
        "☹ OOPS!!! Sorry, I can't mark this as done if it does not exist :("
    );
    assert!(replies[4].contains("yyyy-mm-ddTHours:Minute:Seconds"));
    assert_eq!(
        replies[6],
        "Here are the tasks in your list:\n1.[T][ ] A"
    );
}

#[test]
fn test_tasks_survive_restart() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    let args = ["--file", "tasks.txt"];

    let (_stdout, _stderr, status) = run_duke(
        "todo A\ntodo B\nevent Party /at 2022-08-27T18:40:00\nmark 1\nbye\n",
        dir,
        &args,
    );
    assert_eq!(status, 0);

    let (stdout, _stderr, status) = run_duke("delete 2\nlist\nbye\n", dir, &args);
    assert_eq!(status, 0);

    let replies = responses(&stdout);
    assert_eq!(
        replies[1],
        "Noted. I've removed this task:\n[T][ ] B\nNow you have 2 tasks in the list."
    );
    assert_eq!(
        replies[2],
        "Here are the tasks in your list:\n\
         1.[T][X] A\n\
         2.[E][ ] Party (at: Aug 27 2022 06:40:00 PM)"
    );
}

#[test]
fn test_corrupt_file_exits_with_error() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    std::fs::write(dir.join("tasks.txt"), "[T][ ] fine\n[Z] broken\n").unwrap();

    let (_stdout, stderr, status) = run_duke("list\n", dir, &["--file", "tasks.txt"]);
    assert_ne!(status, 0);
    assert!(stderr.contains("Corrupted task record on line 2"));
}
