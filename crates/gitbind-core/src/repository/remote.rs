//! Remote management
//!
//! Each mutation runs git first and patches the mirror only once git has
//! succeeded. Listing reads the mirror and never spawns a process.

use super::{check_name, Repository};
use crate::command::GitCommand;
use crate::error::{Error, Result};
use crate::mirror::Remote;
use tracing::{debug, info};

/// Exit status of `git remote remove|rename` for an unknown remote
const NO_SUCH_REMOTE_EXIT: i32 = 2;

impl Repository {
    /// Add a remote (`git remote add <name> <url>`)
    ///
    /// # Arguments
    ///
    /// * `name` - Remote name (e.g., "origin", "upstream")
    /// * `url` - Remote URL
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for an empty name or one starting with `-`;
    /// [`Error::Execution`] if git refuses, e.g. the remote already exists.
    pub async fn add_remote(&mut self, name: &str, url: &str) -> Result<()> {
        info!("Adding remote '{}': {}", name, url);
        check_name("remote name", name)?;

        self.git(GitCommand::builder("remote-add").arg(name).arg(url))
            .await?;
        self.mirror.insert_remote(Remote::new(name, url));
        Ok(())
    }

    /// Remove a remote; removing an unknown remote succeeds
    pub async fn remove_remote(&mut self, name: &str) -> Result<()> {
        info!("Removing remote: {}", name);
        check_name("remote name", name)?;

        match self.git(GitCommand::builder("remote-remove").arg(name)).await {
            Ok(_) => {}
            Err(e) if is_no_such_remote(&e) => {
                debug!("Remote '{}' did not exist", name);
            }
            Err(e) => return Err(e),
        }

        self.mirror.remove_remote(name);
        Ok(())
    }

    /// Rename a remote
    ///
    /// Branches tracking `old` are re-pointed at `new` in the mirror, as git
    /// does in the config file.
    ///
    /// # Errors
    ///
    /// Returns git's own [`Error::Execution`] when `new` already exists or
    /// `old` does not.
    pub async fn rename_remote(&mut self, old: &str, new: &str) -> Result<()> {
        info!("Renaming remote '{}' to '{}'", old, new);
        check_name("remote name", old)?;
        check_name("remote name", new)?;

        self.git(GitCommand::builder("remote-rename").arg(old).arg(new))
            .await?;
        self.mirror.rename_remote(old, new);
        Ok(())
    }

    /// All known remotes, ordered by name
    pub fn list_remotes(&self) -> impl Iterator<Item = &Remote> {
        self.mirror.remotes()
    }

    /// One remote by name
    pub fn remote(&self, name: &str) -> Option<&Remote> {
        self.mirror.remote(name)
    }
}

fn is_no_such_remote(err: &Error) -> bool {
    err.stderr_contains("No such remote")
        || err.process().and_then(|p| p.exit_code()) == Some(NO_SUCH_REMOTE_EXIT)
}
