//! Entry point: binds settings to a validated runner and produces repositories

use crate::background::Background;
use crate::command::GitCommand;
use crate::error::{Error, Result};
use crate::mirror::ConfigSources;
use crate::repository::{check_name, Repository};
use crate::runner::GitRunner;
use crate::settings::GitSettings;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info, warn};

/// Creates, clones and opens repositories with one set of [`GitSettings`]
#[derive(Debug, Clone)]
pub struct GitClient {
    runner: GitRunner,
    settings: GitSettings,
}

impl GitClient {
    /// Validate the git binary and build a client
    pub fn new(settings: GitSettings) -> Result<Self> {
        let runner = GitRunner::new(&settings)?;
        Ok(Self { runner, settings })
    }

    pub fn runner(&self) -> &GitRunner {
        &self.runner
    }

    pub fn settings(&self) -> &GitSettings {
        &self.settings
    }

    /// Config tiers for the working tree at `path`
    pub fn config_sources(&self, path: &Utf8Path) -> ConfigSources {
        ConfigSources::for_repository(
            path,
            self.settings.system_config.clone(),
            self.settings.global_config.clone(),
        )
    }

    /// Initialize a repository at `path`, creating the directory if needed
    ///
    /// With `remote_url`, the URL is added as the default remote and recorded
    /// in the config mirror immediately. When HEAD already points at a commit
    /// (re-initializing an existing repository) it is pushed with upstream
    /// tracking.
    pub async fn init(&self, path: &Utf8Path, remote_url: Option<&str>) -> Result<Repository> {
        info!("Initializing git repository at: {}", path);

        let path = ensure_dir(path).await?;
        self.runner
            .exec(&GitCommand::builder("init").flag("quiet").build(), &path)
            .await?;

        let mut repo = Repository::load(self.clone(), path)?;

        if let Some(url) = remote_url {
            let remote = self.settings.default_remote.clone();
            repo.add_remote(&remote, url).await?;

            if repo.is_commit("HEAD").await {
                repo.push(Some(remote.as_str()), Some("HEAD"), true).await?;
            } else {
                debug!("No commits yet, skipping initial push to '{}'", remote);
            }
        }

        info!("Repository initialized at {}", repo.path());
        Ok(repo)
    }

    /// Clone `url` into `path` and wait for completion
    ///
    /// The config mirror is re-read from disk afterwards and the current
    /// branch tracks its counterpart on the default remote when one exists.
    ///
    /// # Arguments
    ///
    /// * `path` - Target directory, created if missing
    /// * `url` - Repository URL or local path
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for an empty URL or one starting with `-`.
    /// A failed clone is [`Error::Execution`]; a directory created for it is
    /// removed again.
    pub async fn clone_repository(&self, path: &Utf8Path, url: &str) -> Result<Repository> {
        info!("Cloning repository: {} -> {}", url, path);

        if url.trim().is_empty() {
            return Err(Error::invalid_argument("clone URL must not be empty"));
        }
        check_name("clone URL", url)?;

        let created = !path.exists();
        let path = ensure_dir(path).await?;
        let cmd = GitCommand::builder("clone")
            .flag("quiet")
            .arg(url)
            .arg(".")
            .build();
        if let Err(e) = self.runner.exec(&cmd, &path).await {
            if created {
                if let Err(cleanup) = tokio::fs::remove_dir_all(&path).await {
                    warn!("Failed to remove {} after failed clone: {}", path, cleanup);
                }
            }
            return Err(e);
        }

        let mut repo = Repository::load(self.clone(), path)?;
        repo.track_default_remote().await?;

        info!("Repository cloned successfully");
        Ok(repo)
    }

    /// Clone in the background
    ///
    /// Returns immediately; no [`Repository`] exists until the handle
    /// resolves. Must be called from within a tokio runtime.
    pub fn clone_in_background(
        &self,
        path: impl Into<Utf8PathBuf>,
        url: impl Into<String>,
    ) -> Background<Repository> {
        let client = self.clone();
        let path = path.into();
        let url = url.into();
        Background::spawn(async move { client.clone_repository(&path, &url).await })
    }

    /// Bind to an existing working tree
    ///
    /// Fails with [`Error::InvalidArgument`] if `path` is not a directory and
    /// [`Error::NotARepository`] if `path/.git/config` is missing. No git
    /// process is spawned.
    pub fn open(&self, path: &Utf8Path) -> Result<Repository> {
        if !path.is_dir() {
            return Err(Error::invalid_argument(format!(
                "not a directory: {}",
                path
            )));
        }
        if !path.join(".git").join("config").is_file() {
            return Err(Error::not_a_repository(path.as_str()));
        }

        let path = path.canonicalize_utf8()?;
        debug!("Opening repository at {}", path);
        Repository::load(self.clone(), path)
    }
}

async fn ensure_dir(path: &Utf8Path) -> Result<Utf8PathBuf> {
    if path.exists() && !path.is_dir() {
        return Err(Error::invalid_argument(format!(
            "not a directory: {}",
            path
        )));
    }
    tokio::fs::create_dir_all(path).await?;
    Ok(path.canonicalize_utf8()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn client() -> GitClient {
        let settings = GitSettings::discover().with_config_files(None, None);
        GitClient::new(settings).unwrap()
    }

    #[test]
    fn test_open_rejects_non_directory() {
        let dir = TempDir::new().unwrap();
        let file = Utf8PathBuf::from_path_buf(dir.path().join("file.txt")).unwrap();
        std::fs::write(&file, "x").unwrap();

        let err = client().open(&file).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));

        let err = client().open(Utf8Path::new("/nonexistent/repo")).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_open_rejects_directory_without_git_config() {
        let dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        std::fs::write(path.join("README.md"), "hello").unwrap();
        std::fs::create_dir(path.join(".git")).unwrap();

        let err = client().open(&path).unwrap_err();
        assert!(matches!(err, Error::NotARepository { .. }));
        assert!(err.is_invalid_argument());
    }

    #[tokio::test]
    async fn test_init_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("nested").join("repo")).unwrap();

        let repo = client().init(&path, None).await.unwrap();

        assert!(path.join(".git").join("config").is_file());
        assert_eq!(repo.list_remotes().count(), 0);
    }

    #[tokio::test]
    async fn test_clone_rejects_empty_url() {
        let dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("clone")).unwrap();

        let err = client().clone_repository(&path, " ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert!(!path.exists());

        let err = client()
            .clone_repository(&path, "--upload-pack=touch /tmp/x")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert!(!path.exists());
    }
}
