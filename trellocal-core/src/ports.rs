//! Collaborator traits implemented by provider crates.

use async_trait::async_trait;

use crate::day_range::DayRange;
use crate::error::SyncResult;
use crate::event::{CalendarEvent, EventFields};
use crate::task::Task;

/// Read-only access to the tasks to mirror.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// All tasks on the board. May include tasks without a due date.
    async fn list_open_tasks(&self) -> SyncResult<Vec<Task>>;
}

/// The calendar trellocal writes to.
#[async_trait]
pub trait CalendarSink: Send + Sync {
    /// Events overlapping `range`, in the service's start-time order.
    /// An empty day is `Ok(vec![])`, never an error.
    async fn list_events_in_range(&self, range: &DayRange) -> SyncResult<Vec<CalendarEvent>>;

    /// Create an all-day event and return its id.
    async fn create_event(&self, fields: &EventFields) -> SyncResult<String>;

    /// Patch an existing event and return its id.
    async fn update_event(&self, event_id: &str, fields: &EventFields) -> SyncResult<String>;
}
