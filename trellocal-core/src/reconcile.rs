//! A single reconciliation run over all tasks.

use std::fmt;

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::{debug, info, warn};

use crate::day_range::DayRange;
use crate::error::SyncResult;
use crate::event::EventFields;
use crate::matcher::{Action, ActionKind, match_task};
use crate::ports::{CalendarSink, TaskSource};
use crate::task::Task;

/// Why a task was left out of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoDueDate,
    Completed,
    Closed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoDueDate => write!(f, "no due date"),
            SkipReason::Completed => write!(f, "completed"),
            SkipReason::Closed => write!(f, "archived"),
        }
    }
}

/// What happened to one task during a run
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Created(String),
    Updated(String),
    Unchanged,
    /// Dry run: the action that would have been taken
    Planned(ActionKind),
    Skipped(SkipReason),
    /// The calendar call failed; the task is retried on the next run
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskOutcome {
    pub task_id: String,
    pub task_name: String,
    pub due: Option<NaiveDate>,
    pub outcome: Outcome,
}

/// Per-task results of a run, in task order.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub outcomes: Vec<TaskOutcome>,
}

impl RunReport {
    fn push(&mut self, task: &Task, outcome: Outcome) {
        self.outcomes.push(TaskOutcome {
            task_id: task.id.clone(),
            task_name: task.name.clone(),
            due: task.due,
            outcome,
        });
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.outcome)).count()
    }

    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Created(_)))
    }

    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Updated(_)))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Unchanged | Outcome::Planned(ActionKind::Pass)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }
}

/// Drives one pass of tasks through the matcher into the calendar.
///
/// Tasks are processed strictly one after another. Calendar failures for a
/// task are logged and recorded; they never stop the run.
pub struct Reconciler<'a> {
    tasks: &'a dyn TaskSource,
    calendar: &'a dyn CalendarSink,
    time_zone: Tz,
    dry_run: bool,
}

impl<'a> Reconciler<'a> {
    pub fn new(tasks: &'a dyn TaskSource, calendar: &'a dyn CalendarSink, time_zone: Tz) -> Self {
        Reconciler {
            tasks,
            calendar,
            time_zone,
            dry_run: false,
        }
    }

    /// Compute actions without creating or patching anything.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run once over every task. Fails only if the task list can't be read.
    pub async fn run(&self) -> SyncResult<RunReport> {
        let tasks = self.tasks.list_open_tasks().await?;
        info!(count = tasks.len(), "Fetched tasks");

        let mut report = RunReport::default();

        for task in &tasks {
            let outcome = match eligible_due_date(task) {
                Err(reason) => {
                    info!(task = %task.name, id = %task.id, %reason, "Skipping task");
                    Outcome::Skipped(reason)
                }
                Ok(due) => match self.reconcile_task(task, due).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        warn!(task = %task.name, id = %task.id, error = %e, "Failed to sync task");
                        Outcome::Failed(e.to_string())
                    }
                },
            };

            report.push(task, outcome);
        }

        info!(
            created = report.created(),
            updated = report.updated(),
            unchanged = report.unchanged(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Run finished"
        );

        Ok(report)
    }

    async fn reconcile_task(&self, task: &Task, due: NaiveDate) -> SyncResult<Outcome> {
        debug!(task = %task.name, id = %task.id, %due, "Checking task");

        let range = DayRange::for_date(due, self.time_zone)?;
        let events = self.calendar.list_events_in_range(&range).await?;
        debug!(count = events.len(), "Events on due date");

        let action = match_task(task, &events);

        if self.dry_run {
            return Ok(Outcome::Planned(action.kind()));
        }

        match action {
            Action::Pass => {
                debug!(task = %task.name, "Already in sync");
                Ok(Outcome::Unchanged)
            }
            Action::Create(task) => {
                let fields = EventFields::for_task(task, due);
                let event_id = self.calendar.create_event(&fields).await?;
                info!(task = %task.name, event = %event_id, "Created event");
                Ok(Outcome::Created(event_id))
            }
            Action::Update(task, event_id) => {
                let fields = EventFields::for_task(task, due);
                let event_id = self.calendar.update_event(&event_id, &fields).await?;
                info!(task = %task.name, event = %event_id, "Updated event");
                Ok(Outcome::Updated(event_id))
            }
        }
    }
}

/// The due date of a task that should be on the calendar.
fn eligible_due_date(task: &Task) -> Result<NaiveDate, SkipReason> {
    let due = task.due.ok_or(SkipReason::NoDueDate)?;

    if task.due_complete {
        return Err(SkipReason::Completed);
    }
    if task.closed {
        return Err(SkipReason::Closed);
    }

    Ok(due)
}
