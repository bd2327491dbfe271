//! `gitbind branch` command handlers

use anyhow::Result;
use gitbind_core::CheckoutOptions;

use super::Context;
use crate::cli::{BranchCommands, CheckoutArgs, DeleteBranchArgs};
use crate::output;

pub async fn run(ctx: &Context, cmd: BranchCommands) -> Result<()> {
    match cmd {
        BranchCommands::List(args) => list(ctx, args.json).await,
        BranchCommands::Current => current(ctx).await,
        BranchCommands::Checkout(args) => checkout(ctx, args).await,
        BranchCommands::Delete(args) => delete(ctx, args).await,
    }
}

async fn list(ctx: &Context, json: bool) -> Result<()> {
    let repo = ctx.open()?;
    let branches = repo.list_branches().await?;

    if json {
        return output::json(&branches);
    }
    if branches.is_empty() {
        output::info("No branches yet");
        return Ok(());
    }

    let current = repo.current_branch().await.ok();
    for branch in &branches {
        if current.as_deref() == Some(branch.as_str()) {
            println!("* {}", console::style(branch).green());
        } else {
            println!("  {}", branch);
        }
    }
    Ok(())
}

async fn current(ctx: &Context) -> Result<()> {
    let repo = ctx.open()?;
    println!("{}", repo.current_branch().await?);
    Ok(())
}

async fn checkout(ctx: &Context, args: CheckoutArgs) -> Result<()> {
    let repo = ctx.open()?;
    let options = match (args.create, args.name) {
        (true, Some(name)) => CheckoutOptions::create_named(name),
        (true, None) => CheckoutOptions::create(),
        (false, _) => CheckoutOptions::default(),
    };

    repo.checkout(&args.refspec, &options).await?;
    output::success(&format!("Checked out {}", repo.current_branch().await?));
    Ok(())
}

async fn delete(ctx: &Context, args: DeleteBranchArgs) -> Result<()> {
    let mut repo = ctx.open()?;

    match repo.delete_branch(&args.branch, args.force, args.remote).await {
        Ok(()) => {
            output::success(&format!("Deleted branch {}", args.branch));
            Ok(())
        }
        Err(e @ gitbind_core::Error::PartialBranchDeletion { .. }) => {
            output::warning(&format!(
                "Local branch {} deleted, remote deletion failed",
                args.branch
            ));
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
