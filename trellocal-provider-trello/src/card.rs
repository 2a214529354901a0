//! Trello card wire type and its conversion to a `Task`.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use trellocal_core::Task;
use trellocal_core::tag::minute_precision;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub due: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_complete: bool,
    #[serde(default)]
    pub closed: bool,
    pub date_last_activity: DateTime<Utc>,
    #[serde(default)]
    pub short_url: String,
}

impl Card {
    /// Convert to a task, resolving dates as wall-clock values in `tz`.
    pub fn into_task(self, tz: Tz) -> Task {
        let due = self.due.map(|d| d.with_timezone(&tz).date_naive());
        let last_modified =
            minute_precision(self.date_last_activity.with_timezone(&tz).naive_local());

        Task {
            id: self.id,
            name: self.name,
            description: self.desc,
            due,
            last_modified,
            due_complete: self.due_complete,
            closed: self.closed,
            url: self.short_url,
        }
    }
}
