//! Fetch, pull and push

use super::{check_name, Repository};
use crate::command::GitCommand;
use crate::error::Result;
use tracing::info;

impl Repository {
    /// `git fetch [--tags]`
    pub async fn fetch(&self, include_tags: bool) -> Result<()> {
        info!("Fetching (tags: {})", include_tags);
        self.git(GitCommand::builder("fetch").flag_if("tags", include_tags))
            .await?;
        Ok(())
    }

    /// `git pull`
    pub async fn pull(&self) -> Result<()> {
        info!("Pulling");
        self.git(GitCommand::builder("pull")).await?;
        Ok(())
    }

    /// `git push [-u] [<remote> [<refspec>]]`
    ///
    /// # Arguments
    ///
    /// * `remote` - Remote to push to; `None` uses the upstream
    /// * `refspec` - What to push; only passed together with a remote
    /// * `set_upstream` - Record the pushed branch's upstream (`-u`)
    pub async fn push(
        &self,
        remote: Option<&str>,
        refspec: Option<&str>,
        set_upstream: bool,
    ) -> Result<()> {
        info!(
            "Pushing {} to {}",
            refspec.unwrap_or("current branch"),
            remote.unwrap_or("upstream")
        );

        let mut cmd = GitCommand::builder("push").flag_if("u", set_upstream);
        if let Some(remote) = remote {
            check_name("remote name", remote)?;
            cmd = cmd.arg(remote);
            if let Some(refspec) = refspec {
                check_name("refspec", refspec)?;
                cmd = cmd.arg(refspec);
            }
        }

        self.git(cmd).await?;
        Ok(())
    }
}
