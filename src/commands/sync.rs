use anyhow::Result;
use trellocal_core::Reconciler;

use super::SyncContext;
use crate::config::Config;
use crate::render::Render;

pub async fn run(config: &Config) -> Result<()> {
    let ctx = SyncContext::from_config(config)?;
    println!("{}", ctx.board_header(config.require_board_id()?).await);

    let report = Reconciler::new(&ctx.board, &ctx.calendar, ctx.time_zone)
        .run()
        .await?;

    for outcome in &report.outcomes {
        println!("{}", outcome.render());
    }
    println!("\n{}", report.render());

    Ok(())
}
