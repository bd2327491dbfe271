//! In-memory mirror of git configuration
//!
//! Built by reading the system, global and local git config files in that
//! order. Each later file overwrites same-named remotes and branches from
//! earlier ones; a missing file is skipped. Only `remote "<name>"`,
//! `branch "<name>"` and `user` sections are mirrored.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use ini::Ini;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use tracing::debug;

/// A configured remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Remote {
    pub name: String,
    pub url: String,
}

impl Remote {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Upstream tracking recorded for a branch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BranchTracking {
    /// Remote the branch tracks (`branch.<name>.remote`)
    pub remote: Option<String>,
    /// Upstream ref (`branch.<name>.merge`)
    pub merge: Option<String>,
}

/// Configured author identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserIdentity {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserIdentity {
    /// Both name and email are present
    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.email.is_some()
    }
}

/// Config files read for one repository, lowest precedence first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSources {
    pub system: Option<Utf8PathBuf>,
    pub global: Option<Utf8PathBuf>,
    pub local: Utf8PathBuf,
}

impl ConfigSources {
    /// Local tier for the working tree at `repo`
    pub fn for_repository(
        repo: &Utf8Path,
        system: Option<Utf8PathBuf>,
        global: Option<Utf8PathBuf>,
    ) -> Self {
        Self {
            system,
            global,
            local: repo.join(".git").join("config"),
        }
    }

    /// Files in read order
    pub fn files(&self) -> impl Iterator<Item = &Utf8Path> {
        self.system
            .as_deref()
            .into_iter()
            .chain(self.global.as_deref())
            .chain(std::iter::once(self.local.as_path()))
    }
}

/// Remotes, branches and identity merged from all config tiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMirror {
    remotes: BTreeMap<String, Remote>,
    branches: BTreeMap<String, BranchTracking>,
    user: UserIdentity,
}

impl ConfigMirror {
    /// Read every tier in precedence order
    pub fn load(sources: &ConfigSources) -> Result<Self> {
        let mut mirror = Self::default();
        for path in sources.files() {
            mirror.merge_file(path)?;
        }
        Ok(mirror)
    }

    /// Merge one config file; a missing file is not an error
    pub fn merge_file(&mut self, path: &Utf8Path) -> Result<()> {
        if !path.is_file() {
            debug!("Skipping missing git config: {}", path);
            return Ok(());
        }

        debug!("Reading git config: {}", path);
        let content = fs::read_to_string(path)?;
        self.merge_str(&content)
            .map_err(|e| Error::config_parse(path.as_str(), e.to_string()))
    }

    /// Merge config text
    pub fn merge_str(&mut self, content: &str) -> std::result::Result<(), ini::ParseError> {
        let ini = Ini::load_from_str(&normalize(content))?;
        self.merge_ini(&ini);
        Ok(())
    }

    fn merge_ini(&mut self, ini: &Ini) {
        for (section, props) in ini.iter() {
            let Some(section) = section else { continue };
            let lookup = |key: &str| {
                props
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(key))
                    .map(|(_, v)| v.to_string())
            };

            match parse_section(section) {
                Some(Section::Remote(name)) => match lookup("url") {
                    Some(url) => {
                        self.remotes.insert(name.clone(), Remote::new(name, url));
                    }
                    None => debug!("Remote '{}' has no url, skipping", name),
                },
                Some(Section::Branch(name)) => {
                    let entry = self.branches.entry(name).or_default();
                    if let Some(remote) = lookup("remote") {
                        entry.remote = Some(remote);
                    }
                    if let Some(merge) = lookup("merge") {
                        entry.merge = Some(merge);
                    }
                }
                Some(Section::User) => {
                    if let Some(name) = lookup("name") {
                        self.user.name = Some(name);
                    }
                    if let Some(email) = lookup("email") {
                        self.user.email = Some(email);
                    }
                }
                None => {}
            }
        }
    }

    /// All remotes, ordered by name
    pub fn remotes(&self) -> impl Iterator<Item = &Remote> {
        self.remotes.values()
    }

    pub fn remote(&self, name: &str) -> Option<&Remote> {
        self.remotes.get(name)
    }

    pub fn has_remote(&self, name: &str) -> bool {
        self.remotes.contains_key(name)
    }

    /// Branch names with a config section, ordered
    pub fn branch_names(&self) -> impl Iterator<Item = &str> {
        self.branches.keys().map(String::as_str)
    }

    pub fn branch(&self, name: &str) -> Option<&BranchTracking> {
        self.branches.get(name)
    }

    pub fn user(&self) -> &UserIdentity {
        &self.user
    }

    pub(crate) fn insert_remote(&mut self, remote: Remote) {
        self.remotes.insert(remote.name.clone(), remote);
    }

    pub(crate) fn remove_remote(&mut self, name: &str) -> Option<Remote> {
        self.remotes.remove(name)
    }

    /// Rename a remote and re-point branches tracking it, as git does
    pub(crate) fn rename_remote(&mut self, old: &str, new: &str) {
        if let Some(remote) = self.remotes.remove(old) {
            self.remotes
                .insert(new.to_string(), Remote::new(new, remote.url));
        }
        for tracking in self.branches.values_mut() {
            if tracking.remote.as_deref() == Some(old) {
                tracking.remote = Some(new.to_string());
            }
        }
    }

    pub(crate) fn remove_branch(&mut self, name: &str) {
        self.branches.remove(name);
    }

    pub(crate) fn set_tracking(&mut self, branch: &str, remote: &str) {
        let entry = self.branches.entry(branch.to_string()).or_default();
        entry.remote = Some(remote.to_string());
        entry.merge = Some(format!("refs/heads/{}", branch));
    }

    pub(crate) fn set_user(&mut self, user: UserIdentity) {
        self.user = user;
    }
}

/// Rewrite git-config syntax that plain INI reads differently
///
/// Unquoted `#`/`;` tails are comments, and a key with no `=` is a boolean
/// `true`.
fn normalize(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for line in content.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('[') || line.contains('=') {
            out.push_str(line);
        } else {
            out.push_str(line);
            out.push_str(" = true");
        }
        out.push('\n');
    }
    out
}

fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            '#' | ';' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}

enum Section {
    Remote(String),
    Branch(String),
    User,
}

/// Classify a section header: `remote "origin"`, `branch.main`, `user`
fn parse_section(header: &str) -> Option<Section> {
    let header = header.trim();
    if header.eq_ignore_ascii_case("user") {
        return Some(Section::User);
    }

    let (kind, rest) = match header.split_once(|c: char| c.is_whitespace() || c == '.') {
        Some(parts) => parts,
        None => return None,
    };
    let name = rest.trim().trim_matches('"').to_string();
    if name.is_empty() {
        return None;
    }

    match kind.to_ascii_lowercase().as_str() {
        "remote" => Some(Section::Remote(name)),
        "branch" => Some(Section::Branch(name)),
        _ => None,
    }
}
