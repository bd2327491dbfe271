//! Command handlers

pub mod branch;
pub mod clone;
pub mod info;
pub mod init;
pub mod log;
pub mod remote;
pub mod stash;
pub mod sync;

use anyhow::{Context as _, Result};
use camino::Utf8PathBuf;
use gitbind_core::{GitClient, Repository, SettingsLoader};
use tracing::debug;

use crate::cli::Cli;

/// Resolved client plus the repository directory from global flags
pub struct Context {
    pub client: GitClient,
    pub repo: Utf8PathBuf,
}

impl Context {
    /// Load settings, apply CLI overrides and validate the git binary
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let loader = match &cli.settings {
            Some(path) => SettingsLoader::with_file(path.clone()),
            None => SettingsLoader::new(),
        };
        let mut settings = loader.load().context("Failed to load gitbind settings")?;

        match &cli.git {
            Some(binary) => settings.binary = binary.clone(),
            None => settings.resolve_binary_from_path(),
        }

        debug!("Using git binary {}", settings.binary);
        let client = GitClient::new(settings).context("git binary is not usable")?;
        Ok(Self {
            client,
            repo: cli.repo.clone(),
        })
    }

    /// Open the repository named by `--repo`
    pub fn open(&self) -> Result<Repository> {
        self.client
            .open(&self.repo)
            .with_context(|| format!("Failed to open repository at {}", self.repo))
    }
}
