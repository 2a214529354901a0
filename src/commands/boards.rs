use anyhow::Result;
use owo_colors::OwoColorize;

use super::trello_client;
use crate::config::Config;

/// List the member's open boards so one can be picked as `board_id`.
pub async fn run(config: &Config) -> Result<()> {
    let client = trello_client(config)?;
    let boards = client.boards().await?;

    for board in boards.iter().filter(|b| !b.closed) {
        let marker = if config.board_id.as_deref() == Some(board.id.as_str()) {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        println!("{} {} {}", marker, board.id.dimmed(), board.name);
    }

    Ok(())
}
