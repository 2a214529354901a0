//! trellocal-provider-google - writes task events to a Google calendar.
//!
//! Talks to the Calendar v3 REST API directly. OAuth consent is out of
//! scope: the sink expects an already issued token file and only refreshes
//! expired access tokens.

mod calendar;
mod convert;
pub mod session;

pub use calendar::{DEFAULT_BASE_URL, DEFAULT_CALENDAR_ID, GoogleCalendar};
pub use convert::{GoogleEvent, GoogleEventTime};
pub use session::{Credentials, Session};
