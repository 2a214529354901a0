//! Creates a valid Google session (access token) that we can use to call the gcal API.
//!
//! Tokens are read from a JSON file obtained out of band. The file written by
//! Google's own client libraries works as is (`expiry_date` in epoch
//! milliseconds). Refreshed tokens are kept in memory only.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Refresh this many seconds before the token actually expires
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Google OAuth client credentials (user-provided).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Clone, Deserialize)]
pub struct SessionData {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expiry_date: Option<i64>,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

impl SessionData {
    pub fn from_tokens(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        SessionData {
            access_token: access_token.into(),
            refresh_token,
            expiry_date: None,
            expires_at,
        }
    }

    fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
            .or_else(|| self.expiry_date.and_then(DateTime::from_timestamp_millis))
    }
}

pub struct Session {
    credentials: Credentials,
    data: SessionData,
    token_url: String,
}

impl Session {
    pub fn new(credentials: Credentials, data: SessionData) -> Self {
        Session {
            credentials,
            data,
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub fn load(path: &Path, credentials: Credentials) -> Result<Self> {
        if !path.exists() {
            bail!(
                "Google OAuth token not found at {}\n\n\
                Authorize the app for the https://www.googleapis.com/auth/calendar scope\n\
                and save the resulting token JSON (access_token, refresh_token, expiry_date)\n\
                to that path.",
                path.display()
            );
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read Google OAuth token from {}", path.display()))?;

        let data: SessionData = serde_json::from_str(&contents).with_context(|| {
            format!("Failed to parse Google OAuth token from {}", path.display())
        })?;

        Ok(Session::new(credentials, data))
    }

    /// A usable access token, refreshing first if the stored one expired.
    pub async fn access_token(&mut self, http: &reqwest::Client) -> Result<String> {
        if self.is_expired() {
            self.refresh(http).await?;
        }
        Ok(self.data.access_token.clone())
    }

    /// With no recorded expiry, a refreshable token is assumed stale.
    fn is_expired(&self) -> bool {
        match self.data.expires_at() {
            Some(expires_at) => Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECS) >= expires_at,
            None => self.data.refresh_token.as_deref().is_some_and(|t| !t.is_empty()),
        }
    }

    async fn refresh(&mut self, http: &reqwest::Client) -> Result<()> {
        let refresh_token = self
            .data
            .refresh_token
            .clone()
            .filter(|t| !t.is_empty())
            .context("Google access token expired and no refresh_token is stored")?;

        debug!("Refreshing Google access token");

        let response = http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("refresh_token", refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .context("Failed to send token refresh request")?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            bail!("Failed to refresh Google access token: {}", error_text);
        }

        #[derive(Deserialize)]
        struct RefreshResponse {
            access_token: String,
            expires_in: i64,
            #[serde(default)]
            refresh_token: Option<String>,
        }

        let refreshed: RefreshResponse = response
            .json()
            .await
            .context("Failed to parse token refresh response")?;

        // Google typically doesn't return a new refresh_token on refresh
        let refresh_token = refreshed
            .refresh_token
            .filter(|t| !t.is_empty())
            .unwrap_or(refresh_token);

        self.data = SessionData::from_tokens(
            refreshed.access_token,
            Some(refresh_token),
            Some(Utc::now() + Duration::seconds(refreshed.expires_in)),
        );

        Ok(())
    }
}
