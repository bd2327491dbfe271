//! Repository facade
//!
//! A [`Repository`] is one binding to one working tree. Every operation is a
//! single git round trip through the client's [`GitRunner`](crate::GitRunner);
//! some also patch the in-memory [`ConfigMirror`].
//!
//! Mirror invalidation:
//! - full reload: construction (`init`, clone, `open`) and [`Repository::reload_config`]
//! - local patch: remote add/remove/rename, branch deletion, `set_user`,
//!   `set_upstream`
//!
//! Mutating methods take `&mut self`; the mirror is not synchronized.

mod branch;
mod history;
mod remote;
mod stash;
mod sync;

use crate::client::GitClient;
use crate::command::{GitCommand, GitCommandBuilder};
use crate::error::{Error, Result};
use crate::mirror::{ConfigMirror, UserIdentity};
use crate::process::ProcessHandle;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

/// A git working tree and its config mirror
#[derive(Debug, Clone)]
pub struct Repository {
    path: Utf8PathBuf,
    client: GitClient,
    mirror: ConfigMirror,
}

impl Repository {
    pub(crate) fn load(client: GitClient, path: Utf8PathBuf) -> Result<Self> {
        let mirror = ConfigMirror::load(&client.config_sources(&path))?;
        Ok(Self {
            path,
            client,
            mirror,
        })
    }

    /// Working tree root
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// The merged config mirror
    pub fn config(&self) -> &ConfigMirror {
        &self.mirror
    }

    /// Configured identity from the mirror
    pub fn user(&self) -> &UserIdentity {
        self.mirror.user()
    }

    /// Re-read all config tiers from disk
    pub fn reload_config(&mut self) -> Result<()> {
        debug!("Reloading config mirror for {}", self.path);
        self.mirror = ConfigMirror::load(&self.client.config_sources(&self.path))?;
        Ok(())
    }

    /// Set user.name and user.email in the local config
    ///
    /// # Arguments
    ///
    /// * `name` - Author name
    /// * `email` - Author email
    ///
    /// The mirror's identity is patched once both values are written, so
    /// [`Repository::stash`] works without a reload.
    pub async fn set_user(&mut self, name: &str, email: &str) -> Result<()> {
        info!("Configuring git user: {} <{}>", name, email);

        self.git(GitCommand::builder("config").flag("local").arg("user.name").arg(name))
            .await?;
        self.git(
            GitCommand::builder("config")
                .flag("local")
                .arg("user.email")
                .arg(email),
        )
        .await?;

        self.mirror.set_user(UserIdentity {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
        });
        Ok(())
    }

    /// Stage `paths` (`git add -- <paths>`)
    pub async fn stage<I, S>(&self, paths: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.git(GitCommand::builder("add").paths(paths)).await?;
        Ok(())
    }

    /// Commit the index with `message`
    pub async fn commit(&self, message: &str) -> Result<()> {
        info!("Committing: {}", message);
        self.git(GitCommand::builder("commit").flag("quiet").value("m", message))
            .await?;
        Ok(())
    }

    pub(crate) fn default_remote(&self) -> &str {
        &self.client.settings().default_remote
    }

    /// Run a command in the working tree, failing on non-zero exit
    pub(crate) async fn git(&self, builder: GitCommandBuilder) -> Result<ProcessHandle> {
        self.client.runner().exec(&builder.build(), &self.path).await
    }
}

/// Reject names git would parse as an option
pub(crate) fn check_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() || name.starts_with('-') {
        return Err(Error::invalid_argument(format!(
            "invalid {}: '{}'",
            kind, name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_name_rejects_option_like_names() {
        assert!(check_name("branch", "feature/x").is_ok());
        assert!(check_name("branch", "HEAD~1").is_ok());

        for bad in ["", "-D", "--force"] {
            let err = check_name("branch", bad).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument { .. }), "{bad}");
        }
    }
}
