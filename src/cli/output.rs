//! Output formatting for the terminal front end.

/// Divider printed above and below every response.
pub const LINE: &str = "____________________________________________________________";

/// Greeting shown when a session starts.
pub fn format_greeting() -> String {
    format_response("Hello! I'm Duke\nWhat can I do for you?")
}

/// Frame a response between dividers.
pub fn format_response(text: &str) -> String {
    format!("{LINE}\n{text}\n{LINE}\n")
}
