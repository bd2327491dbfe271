//! Branch operations

use super::{check_name, Repository};
use crate::command::GitCommand;
use crate::error::{Error, Result};
use crate::types::CheckoutOptions;
use tracing::{debug, info};

impl Repository {
    /// Local branch names, from `git branch`
    pub async fn list_branches(&self) -> Result<Vec<String>> {
        let out = self
            .git(GitCommand::builder("branch").flag("no-color"))
            .await?;
        Ok(out
            .stdout()
            .iter()
            .map(|line| line.trim().trim_start_matches('*').trim().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }

    /// Name of the checked-out branch (`HEAD` when detached)
    pub async fn current_branch(&self) -> Result<String> {
        let out = self
            .git(GitCommand::builder("rev-parse").value("abbrev-ref", "HEAD"))
            .await?;
        out.last_line()
            .map(str::to_string)
            .ok_or_else(|| Error::invalid_argument("git rev-parse printed no branch name"))
    }

    /// Check out `refspec`, optionally creating a branch
    ///
    /// # Arguments
    ///
    /// * `refspec` - Branch, tag or commit to check out
    /// * `options` - Whether to create a branch, and its name
    ///
    /// When the new branch is named after the refspec itself only `-b <name>`
    /// is passed.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `refspec` or the branch name is empty or
    /// starts with `-`.
    pub async fn checkout(&self, refspec: &str, options: &CheckoutOptions) -> Result<()> {
        info!("Checking out: {}", refspec);
        check_name("refspec", refspec)?;

        let mut cmd = GitCommand::builder("checkout");
        if options.create_branch {
            let name = options.branch_name.as_deref().unwrap_or(refspec);
            check_name("branch name", name)?;
            cmd = cmd.value("b", name);
            if name != refspec {
                cmd = cmd.arg(refspec);
            }
        } else {
            cmd = cmd.arg(refspec);
        }

        self.git(cmd).await?;
        Ok(())
    }

    /// Delete a local branch, and optionally its counterpart on the default remote
    ///
    /// `force` uses `-D` instead of `-d`. The remote delete runs only after
    /// the local delete succeeded; if it then fails the result is
    /// [`Error::PartialBranchDeletion`].
    pub async fn delete_branch(&mut self, branch: &str, force: bool, remote: bool) -> Result<()> {
        info!("Deleting branch: {} (force: {}, remote: {})", branch, force, remote);
        check_name("branch name", branch)?;

        let flag = if force { "D" } else { "d" };
        self.git(GitCommand::builder("branch").flag(flag).arg(branch))
            .await?;
        self.mirror.remove_branch(branch);

        if remote {
            let remote_name = self.default_remote().to_string();
            let push = GitCommand::builder("push")
                .arg(&remote_name)
                .arg(format!(":{}", branch));
            if let Err(e) = self.git(push).await {
                return Err(Error::PartialBranchDeletion {
                    branch: branch.to_string(),
                    source: Box::new(e),
                });
            }
            debug!("Deleted '{}' on remote '{}'", branch, remote_name);
        }

        Ok(())
    }

    /// Make the current branch track `<remote>/<branch>`
    pub async fn set_upstream(&mut self, remote: &str, branch: &str) -> Result<()> {
        check_name("remote name", remote)?;
        check_name("branch name", branch)?;
        info!("Setting upstream of '{}' to {}/{}", branch, remote, branch);
        self.git(
            GitCommand::builder("branch")
                .joined("set-upstream-to", format!("{}/{}", remote, branch))
                .arg(branch),
        )
        .await?;
        self.mirror.set_tracking(branch, remote);
        Ok(())
    }

    /// After a clone: track the default remote's copy of the current branch
    pub(crate) async fn track_default_remote(&mut self) -> Result<()> {
        if !self.is_commit("HEAD").await {
            debug!("Cloned repository is empty, no upstream to track");
            return Ok(());
        }

        let branch = self.current_branch().await?;
        let remote = self.default_remote().to_string();
        let remote_ref = format!("refs/remotes/{}/{}", remote, branch);

        if self.is_commit(&remote_ref).await {
            self.set_upstream(&remote, &branch).await
        } else {
            debug!("{} does not exist, leaving upstream unset", remote_ref);
            Ok(())
        }
    }
}
