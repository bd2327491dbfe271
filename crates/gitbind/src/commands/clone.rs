//! `gitbind clone` command handler

use anyhow::{Context as _, Result};

use super::Context;
use crate::cli::CloneArgs;
use crate::output;

/// Clone a repository, optionally in the background with a spinner
pub async fn run(ctx: &Context, args: CloneArgs) -> Result<()> {
    output::kv("Repository", &args.url);
    output::kv("Target directory", args.path.as_str());

    let repo = if args.background {
        let pending = ctx
            .client
            .clone_in_background(args.path.clone(), args.url.clone());
        let spinner = output::spinner("Cloning in background...");
        let result = pending.wait().await;
        spinner.finish_and_clear();
        result
    } else {
        output::info("Cloning repository...");
        ctx.client.clone_repository(&args.path, &args.url).await
    }
    .with_context(|| format!("Failed to clone {}", args.url))?;

    output::success(&format!("Cloned into {}", repo.path()));
    if let Ok(branch) = repo.current_branch().await {
        output::kv("Branch", &branch);
    }
    Ok(())
}
