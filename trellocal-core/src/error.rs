//! Error types for trellocal.

use thiserror::Error;

/// Errors that can occur while reconciling tasks with a calendar.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Task source error: {0}")]
    TaskSource(String),

    #[error("Calendar error: {0}")]
    Calendar(String),

    #[error("Cannot compute day boundaries for {0} in {1}")]
    InvalidDay(chrono::NaiveDate, String),
}

impl SyncError {
    /// Wrap an `anyhow`-style error chain coming from a calendar provider.
    pub fn calendar(err: impl std::fmt::Display) -> Self {
        SyncError::Calendar(err.to_string())
    }

    /// Wrap an error coming from a task provider.
    pub fn task_source(err: impl std::fmt::Display) -> Self {
        SyncError::TaskSource(err.to_string())
    }
}

/// Result type alias for trellocal operations.
pub type SyncResult<T> = Result<T, SyncError>;
