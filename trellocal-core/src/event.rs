//! Provider-neutral calendar event types.
//!
//! Calendar providers convert their API responses into `CalendarEvent`, and
//! accept `EventFields` for creates and patches. The description is the only
//! place trellocal stores sync state (see `tag`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::tag::{self, CorrelationTag};
use crate::task::Task;

/// A calendar event as returned by the calendar service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: String,
    pub description: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    pub time_zone: Option<String>,
}

impl CalendarEvent {
    /// Parse the correlation tag out of the description.
    pub fn tag(&self) -> CorrelationTag {
        self.description
            .as_deref()
            .map(tag::decode)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventTime {
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
}

/// The fields trellocal writes when creating or patching an event.
///
/// Events are always all-day on `day`; the sink applies its configured
/// time zone label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFields {
    pub summary: String,
    pub location: String,
    pub description: String,
    pub day: NaiveDate,
}

impl EventFields {
    pub fn for_task(task: &Task, day: NaiveDate) -> Self {
        EventFields {
            summary: task.name.clone(),
            location: String::new(),
            description: tag::render_description(task),
            day,
        }
    }
}
