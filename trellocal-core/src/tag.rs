//! Correlation tags embedded in event descriptions.
//!
//! An event created by trellocal carries two markers in its description:
//!
//! ```text
//! [TRELLO]<task id>[/TRELLO]
//! [LASTEDIT]YYYY-MM-DD HH:MM[/LASTEDIT]
//! ```
//!
//! These markers are the only sync state that survives between runs, so the
//! delimiters and the minute-precision format must never change.

use std::sync::LazyLock;

use chrono::{NaiveDateTime, Timelike};
use regex::Regex;

use crate::task::Task;

/// Format of the `[LASTEDIT]` timestamp.
pub const LAST_EDIT_FORMAT: &str = "%Y-%m-%d %H:%M";

static TASK_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[TRELLO\](.*)\[/TRELLO\]").expect("valid task id regex"));
static LAST_EDIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[LASTEDIT\](.*)\[/LASTEDIT\]").expect("valid last edit regex")
});

/// The `(task id, last edit)` pair parsed from a description.
///
/// Each half is parsed independently; a missing or malformed marker leaves
/// that half `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrelationTag {
    pub task_id: Option<String>,
    pub last_edit: Option<NaiveDateTime>,
}

/// Render both markers for a task id and its last edit time.
pub fn encode(task_id: &str, last_edit: NaiveDateTime) -> String {
    format!(
        "[TRELLO]{}[/TRELLO]\n[LASTEDIT]{}[/LASTEDIT]",
        task_id,
        minute_precision(last_edit).format(LAST_EDIT_FORMAT)
    )
}

/// Extract the correlation tag from free text. Never fails.
pub fn decode(description: &str) -> CorrelationTag {
    let task_id = TASK_ID_RE
        .captures(description)
        .map(|caps| caps[1].to_string())
        .filter(|id| !id.is_empty());

    let last_edit = LAST_EDIT_RE
        .captures(description)
        .and_then(|caps| NaiveDateTime::parse_from_str(caps[1].trim(), LAST_EDIT_FORMAT).ok());

    CorrelationTag { task_id, last_edit }
}

/// Drop seconds and sub-second precision.
pub fn minute_precision(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

/// Full event description for a task: tag first, then a readable body.
pub fn render_description(task: &Task) -> String {
    format!(
        "{}\nDescription: {}\nLink: {}",
        encode(&task.id, task.last_modified),
        task.description,
        task.url
    )
}
