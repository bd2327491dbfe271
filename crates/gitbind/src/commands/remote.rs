//! `gitbind remote` command handlers

use anyhow::{anyhow, Result};

use super::Context;
use crate::cli::{ListRemotesArgs, RemoteCommands};
use crate::output;

pub async fn run(ctx: &Context, cmd: RemoteCommands) -> Result<()> {
    match cmd {
        RemoteCommands::Add { name, url } => {
            let mut repo = ctx.open()?;
            repo.add_remote(&name, &url).await?;
            output::success(&format!("Added remote {} ({})", name, url));
        }
        RemoteCommands::Remove { name } => {
            let mut repo = ctx.open()?;
            repo.remove_remote(&name).await?;
            output::success(&format!("Removed remote {}", name));
        }
        RemoteCommands::Rename { old, new } => {
            let mut repo = ctx.open()?;
            repo.rename_remote(&old, &new).await?;
            output::success(&format!("Renamed remote {} to {}", old, new));
        }
        RemoteCommands::List(args) => list(ctx, args)?,
    }
    Ok(())
}

fn list(ctx: &Context, args: ListRemotesArgs) -> Result<()> {
    let repo = ctx.open()?;

    let remotes: Vec<_> = match &args.name {
        Some(name) => vec![repo
            .remote(name)
            .ok_or_else(|| anyhow!("No such remote: {}", name))?],
        None => repo.list_remotes().collect(),
    };

    if args.json {
        return output::json(&remotes);
    }
    if remotes.is_empty() {
        output::info("No remotes configured");
        return Ok(());
    }
    for remote in remotes {
        output::kv(&remote.name, &remote.url);
    }
    Ok(())
}
