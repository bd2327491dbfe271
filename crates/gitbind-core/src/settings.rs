//! gitbind settings with hierarchical precedence
//!
//! Precedence (low to high):
//! 1. Built-in defaults
//! 2. Settings file (~/.gitbind/config.yaml)
//! 3. Environment variables (GITBIND_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use tracing::debug;

/// How gitbind locates and drives git
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitSettings {
    /// Absolute path of the git executable
    #[serde(default = "default_binary")]
    pub binary: Utf8PathBuf,

    /// System-wide git config file
    #[serde(default = "default_system_config")]
    pub system_config: Option<Utf8PathBuf>,

    /// Per-user git config file
    #[serde(default = "default_global_config")]
    pub global_config: Option<Utf8PathBuf>,

    /// Remote name used by init, clone and remote branch deletion
    #[serde(default = "default_remote")]
    pub default_remote: String,

    /// Set GIT_TERMINAL_PROMPT=0 so credential prompts fail instead of hanging
    #[serde(default = "default_true")]
    pub disable_prompt: bool,

    /// Extra environment variables for every git process
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            system_config: default_system_config(),
            global_config: default_global_config(),
            default_remote: default_remote(),
            disable_prompt: true,
            env: BTreeMap::new(),
        }
    }
}

impl GitSettings {
    /// Defaults, with the binary resolved from PATH when the default is missing
    pub fn discover() -> Self {
        let mut settings = Self::default();
        settings.resolve_binary_from_path();
        settings
    }

    /// Replace a missing built-in default `binary` with the `git` found on PATH
    ///
    /// An explicitly configured binary is never replaced, so a wrong path
    /// fails at [`GitRunner`](crate::GitRunner) construction.
    pub fn resolve_binary_from_path(&mut self) {
        if self.binary != default_binary() || self.binary.is_file() {
            return;
        }
        if let Ok(found) = which::which("git") {
            if let Ok(path) = Utf8PathBuf::from_path_buf(found) {
                debug!("Configured git {} missing, using {}", self.binary, path);
                self.binary = path;
            }
        }
    }

    /// Use a specific git binary
    pub fn with_binary(mut self, binary: impl Into<Utf8PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Override both shared config tiers (None skips the tier)
    pub fn with_config_files(
        mut self,
        system: Option<Utf8PathBuf>,
        global: Option<Utf8PathBuf>,
    ) -> Self {
        self.system_config = system;
        self.global_config = global;
        self
    }
}

fn default_binary() -> Utf8PathBuf {
    Utf8PathBuf::from("/usr/bin/git")
}

fn default_system_config() -> Option<Utf8PathBuf> {
    Some(Utf8PathBuf::from("/etc/gitconfig"))
}

fn default_global_config() -> Option<Utf8PathBuf> {
    home_dir().map(|home| home.join(".gitconfig"))
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_true() -> bool {
    true
}

/// The user's home directory; `HOME` wins over `dirs::home_dir()`
pub fn home_dir() -> Option<Utf8PathBuf> {
    if let Ok(home) = env::var("HOME") {
        if !home.is_empty() {
            return Some(Utf8PathBuf::from(home));
        }
    }
    dirs::home_dir().and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
}

/// Loads [`GitSettings`] from defaults, a settings file and the environment
pub struct SettingsLoader {
    settings_file: Option<Utf8PathBuf>,
}

impl SettingsLoader {
    /// Loader using ~/.gitbind/config.yaml
    pub fn new() -> Self {
        Self {
            settings_file: home_dir().map(|home| home.join(".gitbind").join("config.yaml")),
        }
    }

    /// Loader with an explicit settings file
    pub fn with_file(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            settings_file: Some(path.into()),
        }
    }

    /// Resolve settings with full precedence
    pub fn load(&self) -> Result<GitSettings> {
        let mut settings = match &self.settings_file {
            Some(path) if path.exists() => Self::load_yaml_file(path)?,
            _ => GitSettings::default(),
        };

        Self::apply_env_overrides(&mut settings);
        Ok(settings)
    }

    fn load_yaml_file(path: &Utf8Path) -> Result<GitSettings> {
        debug!("Loading settings from {}", path);
        let content = fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::settings(format!("Failed to parse {}: {}", path, e)))
    }

    fn apply_env_overrides(settings: &mut GitSettings) {
        if let Ok(val) = env::var("GITBIND_GIT_BINARY") {
            settings.binary = Utf8PathBuf::from(val);
        }

        if let Ok(val) = env::var("GITBIND_SYSTEM_CONFIG") {
            settings.system_config = non_empty_path(val);
        }

        if let Ok(val) = env::var("GITBIND_GLOBAL_CONFIG") {
            settings.global_config = non_empty_path(val);
        }

        if let Ok(val) = env::var("GITBIND_DEFAULT_REMOTE") {
            if !val.is_empty() {
                settings.default_remote = val;
            }
        }
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// An empty override disables the tier
fn non_empty_path(val: String) -> Option<Utf8PathBuf> {
    if val.is_empty() {
        None
    } else {
        Some(Utf8PathBuf::from(val))
    }
}
