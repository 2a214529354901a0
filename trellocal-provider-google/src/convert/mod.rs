mod from_google;
mod to_google;
mod types;

pub use types::{EventList, GoogleEvent, GoogleEventTime, GoogleReminders};

/// Convert from Google API types to trellocal types
pub trait FromGoogle<T> {
    fn from_google(value: T) -> anyhow::Result<Self>
    where
        Self: Sized;
}

/// Convert to Google API types from trellocal types
pub trait ToGoogle<T> {
    fn to_google(&self, time_zone: &str) -> T;
}
