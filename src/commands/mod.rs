pub mod boards;
pub mod status;
pub mod sync;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use tracing::warn;
use trellocal_provider_google::{Credentials, GoogleCalendar, Session};
use trellocal_provider_trello::{TrelloBoard, TrelloClient};

use crate::config::Config;

/// The two collaborators of a run, built once from config.
pub struct SyncContext {
    pub board: TrelloBoard,
    pub calendar: GoogleCalendar,
    pub time_zone: Tz,
}

impl SyncContext {
    pub fn from_config(config: &Config) -> Result<Self> {
        let time_zone = config.tz()?;
        let board_id = config.require_board_id()?;
        let google = config.require_google()?;

        let board = TrelloBoard::new(trello_client(config)?, board_id, time_zone);

        let credentials = Credentials {
            client_id: google.client_id.clone(),
            client_secret: google.client_secret.clone(),
        };
        let session = Session::load(&google.token_path()?, credentials)?;
        let calendar = GoogleCalendar::new(session, &config.calendar_id, config.time_zone.as_str())
            .context("Failed to set up Google Calendar client")?;

        Ok(Self {
            board,
            calendar,
            time_zone,
        })
    }

    /// Header line naming the board, falling back to its id.
    pub async fn board_header(&self, board_id: &str) -> String {
        match self.board.info().await {
            Ok(board) => format!("{} {}", board.name.bold(), board.url.dimmed()),
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Could not fetch board details");
                board_id.bold().to_string()
            }
        }
    }
}

pub fn trello_client(config: &Config) -> Result<TrelloClient> {
    TrelloClient::new(&config.trello.key, &config.trello.token)
        .context("Failed to set up Trello client")
}
