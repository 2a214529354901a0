//! trellocal-provider-trello - reads due-dated cards from a Trello board.

mod api;
mod board;
mod card;

pub use api::{DEFAULT_BASE_URL, TrelloClient};
pub use board::Board;
pub use card::Card;

use async_trait::async_trait;
use chrono_tz::Tz;
use tracing::debug;
use trellocal_core::{SyncError, SyncResult, Task, TaskSource};

/// The cards of one board, exposed as a `TaskSource`.
pub struct TrelloBoard {
    client: TrelloClient,
    board_id: String,
    time_zone: Tz,
}

impl TrelloBoard {
    pub fn new(client: TrelloClient, board_id: impl Into<String>, time_zone: Tz) -> Self {
        Self {
            client,
            board_id: board_id.into(),
            time_zone,
        }
    }

    /// Name and link of the mirrored board.
    pub async fn info(&self) -> anyhow::Result<Board> {
        self.client.board(&self.board_id).await
    }
}

#[async_trait]
impl TaskSource for TrelloBoard {
    async fn list_open_tasks(&self) -> SyncResult<Vec<Task>> {
        let cards = self
            .client
            .open_cards(&self.board_id)
            .await
            .map_err(|e| SyncError::task_source(format!("{e:#}")))?;

        debug!(board = %self.board_id, count = cards.len(), "Fetched cards");

        Ok(cards
            .into_iter()
            .map(|card| card.into_task(self.time_zone))
            .collect())
    }
}
