//! `gitbind init` command handler

use anyhow::{Context as _, Result};

use super::Context;
use crate::cli::InitArgs;
use crate::output;

pub async fn run(ctx: &Context, args: InitArgs) -> Result<()> {
    let path = args.path.unwrap_or_else(|| ctx.repo.clone());

    let repo = ctx
        .client
        .init(&path, args.remote.as_deref())
        .await
        .with_context(|| format!("Failed to initialize repository at {}", path))?;

    output::success(&format!("Initialized repository at {}", repo.path()));
    for remote in repo.list_remotes() {
        output::kv(&remote.name, &remote.url);
    }
    Ok(())
}
