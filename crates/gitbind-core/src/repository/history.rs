//! Commit history

use super::Repository;
use crate::command::GitCommand;
use crate::error::Result;
use crate::types::Commit;
use tracing::debug;

impl Repository {
    /// Commits from HEAD, newest first
    ///
    /// # Arguments
    ///
    /// * `offset` - Number of newest commits to skip
    /// * `limit` - Maximum commits to return; `None` returns all of them
    ///
    /// # Returns
    ///
    /// One [`Commit`] per `--pretty=oneline` line.
    pub async fn list_commits(&self, offset: usize, limit: Option<usize>) -> Result<Vec<Commit>> {
        let mut cmd = GitCommand::builder("log")
            .flag("no-color")
            .joined("pretty", "oneline");
        if offset > 0 {
            cmd = cmd.joined("skip", offset.to_string());
        }
        if let Some(limit) = limit {
            cmd = cmd.value("n", limit.to_string());
        }

        let out = self.git(cmd).await?;
        Ok(out
            .stdout()
            .iter()
            .filter_map(|line| Commit::parse_oneline(line))
            .collect())
    }

    /// Whether `sha` names a commit; any failure means `false`
    pub async fn is_commit(&self, sha: &str) -> bool {
        if sha.is_empty() || sha.starts_with('-') {
            debug!("'{}' is not a revision", sha);
            return false;
        }

        let cmd = GitCommand::builder("rev-parse")
            .flag("quiet")
            .flag("verify")
            .arg(format!("{}^{{commit}}", sha));

        match self.git(cmd).await {
            Ok(_) => true,
            Err(e) => {
                debug!("{} is not a commit: {}", sha, e);
                false
            }
        }
    }
}
