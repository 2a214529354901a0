//! Day boundaries for fetching the events scheduled on a task's due date.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{SyncError, SyncResult};

/// The UTC instants bounding one local calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRange {
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayRange {
    /// Local 00:00:00 to 23:59:59 of `date` in `tz`.
    pub fn for_date(date: NaiveDate, tz: Tz) -> SyncResult<Self> {
        let start = local_to_utc(date.and_time(NaiveTime::MIN), tz)
            .ok_or_else(|| SyncError::InvalidDay(date, tz.name().to_string()))?;

        let last_second = NaiveTime::from_hms_opt(23, 59, 59)
            .ok_or_else(|| SyncError::InvalidDay(date, tz.name().to_string()))?;
        let end = local_to_utc(date.and_time(last_second), tz)
            .ok_or_else(|| SyncError::InvalidDay(date, tz.name().to_string()))?;

        Ok(DayRange { date, start, end })
    }

    /// `start` as RFC3339, as expected by `timeMin`.
    pub fn start_rfc3339(&self) -> String {
        self.start.to_rfc3339()
    }

    /// `end` as RFC3339, as expected by `timeMax`.
    pub fn end_rfc3339(&self) -> String {
        self.end.to_rfc3339()
    }
}

/// Resolve a wall-clock time to UTC. Ambiguous times take the earlier
/// instant; times inside a DST gap move forward to the first valid instant.
fn local_to_utc(local: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    if let Some(t) = tz.from_local_datetime(&local).earliest() {
        return Some(t.with_timezone(&Utc));
    }

    (1..=4)
        .map(|h| local + Duration::minutes(30 * h))
        .find_map(|shifted| tz.from_local_datetime(&shifted).earliest())
        .map(|t| t.with_timezone(&Utc))
}
