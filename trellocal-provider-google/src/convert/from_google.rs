use anyhow::{Result, bail};
use trellocal_core::{CalendarEvent, EventTime};

use super::{FromGoogle, GoogleEvent, GoogleEventTime};

impl FromGoogle<GoogleEvent> for CalendarEvent {
    fn from_google(event: GoogleEvent) -> Result<Self> {
        let Some(start) = event.start.as_ref().and_then(event_time) else {
            bail!("Event {} has no start time", event.id);
        };
        let Some(end) = event.end.as_ref().and_then(event_time) else {
            bail!("Event {} has no end time", event.id);
        };

        let time_zone = event.start.and_then(|s| s.time_zone);

        Ok(CalendarEvent {
            id: event.id,
            summary: event.summary,
            description: event.description,
            start,
            end,
            time_zone,
        })
    }
}

fn event_time(time: &GoogleEventTime) -> Option<EventTime> {
    if let Some(dt) = time.date_time {
        Some(EventTime::DateTime(dt))
    } else {
        time.date.map(EventTime::Date)
    }
}
