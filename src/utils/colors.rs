//! ANSI color helpers for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const ORANGE: &str = "\x1b[38;5;208m";

use crate::models::Status;

/// Active → green, Away → red.
pub fn color_for_status(status: Status) -> &'static str {
    match status {
        Status::Active => GREEN,
        Status::Away => RED,
    }
}

/// Away past the alert threshold → orange, otherwise the status color.
pub fn color_for_absence(status: Status, overdue: bool) -> &'static str {
    if overdue { ORANGE } else { color_for_status(status) }
}

/// Grey out placeholders such as `--` or an empty cell.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--" || v == "00:00" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
