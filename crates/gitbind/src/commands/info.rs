//! `gitbind info` command handler

use anyhow::Result;
use serde::Serialize;

use super::Context;
use crate::cli::InfoArgs;
use crate::output;
use gitbind_core::{BranchTracking, Remote, UserIdentity};

#[derive(Serialize)]
struct InfoReport<'a> {
    path: &'a str,
    remotes: Vec<&'a Remote>,
    branches: Vec<(&'a str, &'a BranchTracking)>,
    user: &'a UserIdentity,
}

/// Show what the config mirror holds; no git process is run
pub fn run(ctx: &Context, args: InfoArgs) -> Result<()> {
    let repo = ctx.open()?;
    let config = repo.config();

    let report = InfoReport {
        path: repo.path().as_str(),
        remotes: config.remotes().collect(),
        branches: config
            .branch_names()
            .filter_map(|name| config.branch(name).map(|t| (name, t)))
            .collect(),
        user: config.user(),
    };

    if args.json {
        return output::json(&report);
    }

    output::header("Repository");
    output::kv("Path", report.path);
    output::kv("User", report.user.name.as_deref().unwrap_or("(unset)"));
    output::kv("Email", report.user.email.as_deref().unwrap_or("(unset)"));

    output::header("Remotes");
    for remote in &report.remotes {
        output::kv(&remote.name, &remote.url);
    }

    output::header("Tracked branches");
    for (name, tracking) in &report.branches {
        let upstream = match (&tracking.remote, &tracking.merge) {
            (Some(remote), Some(merge)) => {
                format!("{}/{}", remote, merge.trim_start_matches("refs/heads/"))
            }
            (Some(remote), None) => remote.clone(),
            _ => "(none)".to_string(),
        };
        output::kv(name, &upstream);
    }
    Ok(())
}
