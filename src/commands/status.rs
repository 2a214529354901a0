use anyhow::Result;
use owo_colors::OwoColorize;
use trellocal_core::Reconciler;

use super::SyncContext;
use crate::config::Config;
use crate::render::Render;

/// Show what `sync` would do without touching the calendar.
pub async fn run(config: &Config) -> Result<()> {
    let ctx = SyncContext::from_config(config)?;
    println!("{}", ctx.board_header(config.require_board_id()?).await);

    let report = Reconciler::new(&ctx.board, &ctx.calendar, ctx.time_zone)
        .dry_run(true)
        .run()
        .await?;

    if report.outcomes.is_empty() {
        println!("{}", "No open cards on the board".dimmed());
        return Ok(());
    }

    for outcome in &report.outcomes {
        println!("{}", outcome.render());
    }

    Ok(())
}
