//! Google Calendar v3 REST calls.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::warn;
use trellocal_core::{CalendarEvent, CalendarSink, DayRange, EventFields, SyncError, SyncResult};
use url::Url;

use crate::convert::{EventList, FromGoogle, GoogleEvent, GoogleReminders, ToGoogle};
use crate::session::Session;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Google's alias for the user's main calendar
pub const DEFAULT_CALENDAR_ID: &str = "primary";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One Google calendar, exposed as a `CalendarSink`.
pub struct GoogleCalendar {
    http: reqwest::Client,
    base_url: Url,
    calendar_id: String,
    time_zone: String,
    session: Mutex<Session>,
}

impl GoogleCalendar {
    pub fn new(
        session: Session,
        calendar_id: impl Into<String>,
        time_zone: impl Into<String>,
    ) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, session, calendar_id, time_zone)
    }

    pub fn with_base_url(
        base_url: &str,
        session: Session,
        calendar_id: impl Into<String>,
        time_zone: impl Into<String>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid Google Calendar API URL: {base_url}"))?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url,
            calendar_id: calendar_id.into(),
            time_zone: time_zone.into(),
            session: Mutex::new(session),
        })
    }

    /// All single events overlapping `range`, ordered by start time.
    pub async fn list_events(&self, range: &DayRange) -> Result<Vec<GoogleEvent>> {
        let url = self.events_url(None)?;
        let token = self.access_token().await?;

        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(url.clone())
                .bearer_auth(&token)
                .query(&[
                    ("timeMin", range.start_rfc3339()),
                    ("timeMax", range.end_rfc3339()),
                    ("singleEvents", "true".to_string()),
                    ("orderBy", "startTime".to_string()),
                ]);
            if let Some(page) = &page_token {
                request = request.query(&[("pageToken", page)]);
            }

            let response = request
                .send()
                .await
                .context("Failed to send request to Google Calendar")?;
            let page: EventList = parse_response(response).await?;

            events.extend(page.items);

            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        Ok(events)
    }

    pub async fn insert_event(&self, event: &GoogleEvent) -> Result<GoogleEvent> {
        let url = self.events_url(None)?;
        let token = self.access_token().await?;

        let response = self
            .http
            .post(url)
            .bearer_auth(&token)
            .json(event)
            .send()
            .await
            .with_context(|| format!("Failed to create event: {}", event.summary))?;

        parse_response(response)
            .await
            .with_context(|| format!("Failed to create event: {}", event.summary))
    }

    pub async fn patch_event(&self, event_id: &str, event: &GoogleEvent) -> Result<GoogleEvent> {
        let url = self.events_url(Some(event_id))?;
        let token = self.access_token().await?;

        let response = self
            .http
            .patch(url)
            .bearer_auth(&token)
            .json(event)
            .send()
            .await
            .with_context(|| format!("Failed to update event: {}", event_id))?;

        parse_response(response)
            .await
            .with_context(|| format!("Failed to update event: {}", event_id))
    }

    async fn access_token(&self) -> Result<String> {
        self.session.lock().await.access_token(&self.http).await
    }

    /// `calendars/{calendar_id}/events[/{event_id}]`, segments escaped.
    fn events_url(&self, event_id: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                anyhow::anyhow!("Google Calendar API URL cannot be a base: {}", self.base_url)
            })?;
            segments
                .pop_if_empty()
                .extend(["calendars", self.calendar_id.as_str(), "events"]);
            if let Some(id) = event_id {
                segments.push(id);
            }
        }
        Ok(url)
    }
}

async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        bail!("Google Calendar API returned {}: {}", status, error_text.trim());
    }

    response
        .json()
        .await
        .context("Failed to parse Google Calendar response")
}

#[async_trait]
impl CalendarSink for GoogleCalendar {
    async fn list_events_in_range(&self, range: &DayRange) -> SyncResult<Vec<CalendarEvent>> {
        let events = self
            .list_events(range)
            .await
            .map_err(|e| SyncError::calendar(format!("{e:#}")))?;

        Ok(events
            .into_iter()
            .filter_map(|event| match CalendarEvent::from_google(event) {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!(error = %e, "Ignoring unreadable event");
                    None
                }
            })
            .collect())
    }

    async fn create_event(&self, fields: &EventFields) -> SyncResult<String> {
        let mut event = fields.to_google(&self.time_zone);
        event.reminders = Some(GoogleReminders { use_default: true });

        let created = self
            .insert_event(&event)
            .await
            .map_err(|e| SyncError::calendar(format!("{e:#}")))?;

        Ok(created.id)
    }

    async fn update_event(&self, event_id: &str, fields: &EventFields) -> SyncResult<String> {
        let event = fields.to_google(&self.time_zone);

        let patched = self
            .patch_event(event_id, &event)
            .await
            .map_err(|e| SyncError::calendar(format!("{e:#}")))?;

        Ok(patched.id)
    }
}
