//! Task records read from the task source.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A due-dated task (a Trello card).
///
/// Dates are wall-clock values in the configured time zone. `last_modified`
/// is kept at minute precision so it compares cleanly with `[LASTEDIT]` tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub description: String,
    pub due: Option<NaiveDate>,
    pub last_modified: NaiveDateTime,
    /// Due date marked complete
    pub due_complete: bool,
    /// Archived
    pub closed: bool,
    pub url: String,
}
