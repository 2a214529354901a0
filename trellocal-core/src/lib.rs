//! Core types and reconciliation logic for trellocal.
//!
//! This crate is provider-neutral:
//! - `tag` encodes/decodes the correlation tag stored in event descriptions
//! - `matcher` decides what to do with one task given that day's events
//! - `reconcile` drives a full run over a `TaskSource` and a `CalendarSink`
//!
//! Provider crates implement the traits in `ports`; the CLI wires them together.

pub mod day_range;
pub mod error;
pub mod event;
pub mod matcher;
pub mod ports;
pub mod reconcile;
pub mod tag;
pub mod task;

pub use day_range::DayRange;
pub use error::{SyncError, SyncResult};
pub use event::{CalendarEvent, EventFields, EventTime};
pub use matcher::{Action, ActionKind, match_task};
pub use ports::{CalendarSink, TaskSource};
pub use reconcile::{Outcome, Reconciler, RunReport, SkipReason, TaskOutcome};
pub use tag::CorrelationTag;
pub use task::Task;
