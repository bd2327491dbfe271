//! `gitbind fetch`, `pull` and `push` command handlers

use anyhow::Result;

use super::Context;
use crate::cli::{FetchArgs, PushArgs};
use crate::output;

pub async fn fetch(ctx: &Context, args: FetchArgs) -> Result<()> {
    let repo = ctx.open()?;
    let spinner = output::spinner("Fetching...");
    let result = repo.fetch(args.tags).await;
    spinner.finish_and_clear();
    result?;
    output::success("Fetched");
    Ok(())
}

pub async fn pull(ctx: &Context) -> Result<()> {
    let repo = ctx.open()?;
    let spinner = output::spinner("Pulling...");
    let result = repo.pull().await;
    spinner.finish_and_clear();
    result?;
    output::success(&format!("Pulled {}", repo.current_branch().await?));
    Ok(())
}

pub async fn push(ctx: &Context, args: PushArgs) -> Result<()> {
    let repo = ctx.open()?;
    let spinner = output::spinner("Pushing...");
    let result = repo
        .push(
            args.remote.as_deref(),
            args.refspec.as_deref(),
            args.set_upstream,
        )
        .await;
    spinner.finish_and_clear();
    result?;
    output::success("Pushed");
    Ok(())
}
