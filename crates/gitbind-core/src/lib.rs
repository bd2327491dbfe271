//! # gitbind-core
//!
//! Typed binding over the `git` command-line tool:
//! - Command construction ([`GitCommand`]) with compound subcommand translation
//! - Process execution ([`GitRunner`]) awaited or in the [`Background`]
//! - stderr classification into [`Error::Execution`]
//! - Repository facade ([`Repository`]) for branches, remotes, history,
//!   fetch/pull/push and stash
//! - Config mirror ([`ConfigMirror`]) merged from system, global and local
//!   git config files
//!
//! # Examples
//!
//! ## Open a repository and add a remote
//!
//! ```no_run
//! use gitbind_core::{GitClient, GitSettings};
//! use camino::Utf8Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitClient::new(GitSettings::discover())?;
//! let mut repo = client.open(Utf8Path::new("/tmp/my-project"))?;
//! repo.add_remote("upstream", "https://github.com/original/repo.git").await?;
//!
//! for remote in repo.list_remotes() {
//!     println!("{} -> {}", remote.name, remote.url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Clone in the background
//!
//! ```no_run
//! use gitbind_core::{GitClient, GitSettings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitClient::new(GitSettings::discover())?;
//! let pending = client.clone_in_background("/tmp/my-clone", "https://github.com/user/repo.git");
//!
//! // ... other work ...
//!
//! let repo = pending.wait().await?;
//! println!("on branch {}", repo.current_branch().await?);
//! # Ok(())
//! # }
//! ```

pub mod background;
pub mod classify;
pub mod client;
pub mod command;
pub mod error;
pub mod mirror;
pub mod process;
pub mod repository;
pub mod runner;
pub mod settings;
pub mod types;

pub use background::Background;
pub use classify::classify_stderr;
pub use client::GitClient;
pub use command::{GitCommand, GitCommandBuilder, OptionValue};
pub use error::{Error, Result};
pub use mirror::{BranchTracking, ConfigMirror, ConfigSources, Remote, UserIdentity};
pub use process::{ProcessHandle, ProcessState};
pub use repository::Repository;
pub use runner::GitRunner;
pub use settings::{GitSettings, SettingsLoader};
pub use types::{CheckoutOptions, Commit};
