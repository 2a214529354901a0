//! Minimal Trello REST client.
//!
//! Every request is authenticated with the `key` and `token` query
//! parameters. DOC: https://developer.atlassian.com/cloud/trello/rest/

use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use url::Url;

use crate::board::Board;
use crate::card::Card;

pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct TrelloClient {
    http: reqwest::Client,
    base_url: Url,
    key: String,
    token: String,
}

impl TrelloClient {
    pub fn new(key: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, key, token)
    }

    pub fn with_base_url(
        base_url: &str,
        key: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid Trello API URL: {base_url}"))?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url,
            key: key.into(),
            token: token.into(),
        })
    }

    /// Open (non-archived) cards on a board.
    pub async fn open_cards(&self, board_id: &str) -> Result<Vec<Card>> {
        self.get(&["boards", board_id, "cards", "open"])
            .await
            .with_context(|| format!("Failed to fetch cards for board {board_id}"))
    }

    /// Boards the token's member belongs to.
    pub async fn boards(&self) -> Result<Vec<Board>> {
        self.get(&["members", "me", "boards"])
            .await
            .context("Failed to fetch boards")
    }

    pub async fn board(&self, board_id: &str) -> Result<Board> {
        self.get(&["boards", board_id])
            .await
            .with_context(|| format!("Failed to fetch board {board_id}"))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Trello API URL cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;

        let response = self
            .http
            .get(url)
            .query(&[("key", &self.key), ("token", &self.token)])
            .send()
            .await
            .context("Failed to send request to Trello")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            bail!("Trello API returned {}: {}", status, error_text.trim());
        }

        response
            .json()
            .await
            .context("Failed to parse Trello response")
    }
}
