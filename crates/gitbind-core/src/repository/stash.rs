//! Stash push/pop

use super::Repository;
use crate::command::GitCommand;
use crate::error::{Error, Result};
use tracing::info;

impl Repository {
    /// Stash local changes
    ///
    /// git records the stash as a commit, so a complete user identity must be
    /// configured. This is checked against the mirror before git runs.
    pub async fn stash(&self) -> Result<()> {
        let user = self.mirror.user();
        if user.name.is_none() {
            return Err(Error::missing_identity("user.name"));
        }
        if user.email.is_none() {
            return Err(Error::missing_identity("user.email"));
        }

        info!("Stashing local changes");
        self.git(GitCommand::builder("stash")).await?;
        Ok(())
    }

    /// Apply and drop the latest stash
    pub async fn stash_pop(&self) -> Result<()> {
        info!("Popping latest stash");
        self.git(GitCommand::builder("stash-pop")).await?;
        Ok(())
    }
}
