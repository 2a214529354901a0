use trellocal_core::EventFields;

use super::{GoogleEvent, GoogleEventTime, ToGoogle};

impl ToGoogle<GoogleEvent> for EventFields {
    /// All-day event on `day`, start and end both labelled with `time_zone`.
    fn to_google(&self, time_zone: &str) -> GoogleEvent {
        let day = GoogleEventTime {
            date: Some(self.day),
            date_time: None,
            time_zone: Some(time_zone.to_string()),
        };

        GoogleEvent {
            id: String::new(),
            summary: self.summary.clone(),
            description: Some(self.description.clone()),
            location: Some(self.location.clone()),
            start: Some(day.clone()),
            end: Some(day),
            reminders: None,
        }
    }
}
