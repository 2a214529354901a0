//! Decide what to do with a task given the events already on its due date.

use std::fmt;
use std::ops::ControlFlow;

use tracing::debug;

use crate::event::CalendarEvent;
use crate::tag::minute_precision;
use crate::task::Task;

/// What a reconciliation run should do for one task.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<'a> {
    /// An event for this task exists and is up to date.
    Pass,
    /// No event for this task exists on its due date.
    Create(&'a Task),
    /// The event with this id is tagged with an older edit time.
    Update(&'a Task, String),
}

impl Action<'_> {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Pass => ActionKind::Pass,
            Action::Create(_) => ActionKind::Create,
            Action::Update(..) => ActionKind::Update,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Pass,
    Create,
    Update,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Pass => write!(f, "="),
            ActionKind::Create => write!(f, "+"),
            ActionKind::Update => write!(f, "~"),
        }
    }
}

/// Match `task` against `events` in the order given.
///
/// Events not tagged with the task's id leave a tentative `Create` and the
/// scan continues; the first event tagged with the task's id settles the
/// result: `Update` if its last edit is strictly older than the task,
/// otherwise `Pass`. A matching id with an unreadable timestamp counts as
/// in sync.
pub fn match_task<'a>(task: &'a Task, events: &[CalendarEvent]) -> Action<'a> {
    // Tags only carry minutes
    let task_edit = minute_precision(task.last_modified);

    let scan = events
        .iter()
        .try_fold(Action::Create(task), |_tentative, event| {
            let tag = event.tag();

            if tag.task_id.as_deref() != Some(task.id.as_str()) {
                debug!(event = %event.summary, "Unrelated event");
                return ControlFlow::Continue(Action::Create(task));
            }

            match tag.last_edit {
                Some(last_edit) if last_edit < task_edit => {
                    debug!(
                        event = %event.summary,
                        %last_edit,
                        %task_edit,
                        "Event is stale"
                    );
                    ControlFlow::Break(Action::Update(task, event.id.clone()))
                }
                _ => ControlFlow::Break(Action::Pass),
            }
        });

    match scan {
        ControlFlow::Break(action) | ControlFlow::Continue(action) => action,
    }
}
