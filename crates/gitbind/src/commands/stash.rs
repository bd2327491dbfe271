//! `gitbind stash` command handlers

use anyhow::Result;

use super::Context;
use crate::cli::StashCommands;
use crate::output;

pub async fn run(ctx: &Context, cmd: StashCommands) -> Result<()> {
    let repo = ctx.open()?;
    match cmd {
        StashCommands::Push => {
            repo.stash().await?;
            output::success("Stashed local changes");
        }
        StashCommands::Pop => {
            repo.stash_pop().await?;
            output::success("Restored stashed changes");
        }
    }
    Ok(())
}
