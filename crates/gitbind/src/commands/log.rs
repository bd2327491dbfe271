//! `gitbind log` and `gitbind is-commit` command handlers

use anyhow::Result;
use console::style;

use super::Context;
use crate::cli::{IsCommitArgs, LogArgs};
use crate::output;

pub async fn run(ctx: &Context, args: LogArgs) -> Result<()> {
    let repo = ctx.open()?;
    let commits = repo.list_commits(args.offset, args.limit).await?;

    if args.json {
        return output::json(&commits);
    }
    for commit in &commits {
        let short = commit.sha.get(..12).unwrap_or(&commit.sha);
        println!("{} {}", style(short).yellow(), commit.description);
    }
    Ok(())
}

/// Prints `true` or `false`; exits 0 either way
pub async fn is_commit(ctx: &Context, args: IsCommitArgs) -> Result<()> {
    let repo = ctx.open()?;
    println!("{}", repo.is_commit(&args.sha).await);
    Ok(())
}
