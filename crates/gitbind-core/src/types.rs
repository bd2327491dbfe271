//! Value types returned by repository operations

use serde::Serialize;

/// One `git log --pretty=oneline` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub sha: String,
    pub description: String,
}

impl Commit {
    /// Split a oneline log entry at its first space
    pub fn parse_oneline(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (sha, description) = line.split_once(' ').unwrap_or((line, ""));
        Some(Self {
            sha: sha.to_string(),
            description: description.to_string(),
        })
    }
}

/// Options for [`Repository::checkout`](crate::Repository::checkout)
#[derive(Debug, Clone, Default)]
pub struct CheckoutOptions {
    /// Create a new branch (`-b`)
    pub create_branch: bool,
    /// Name of the new branch; defaults to the refspec
    pub branch_name: Option<String>,
}

impl CheckoutOptions {
    /// Create a branch named after the refspec
    pub fn create() -> Self {
        Self {
            create_branch: true,
            branch_name: None,
        }
    }

    /// Create a branch with an explicit name
    pub fn create_named(name: impl Into<String>) -> Self {
        Self {
            create_branch: true,
            branch_name: Some(name.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_oneline() {
        let commit =
            Commit::parse_oneline("3f2a9c1e8b7d fix: handle detached HEAD in status").unwrap();
        assert_eq!(commit.sha, "3f2a9c1e8b7d");
        assert_eq!(commit.description, "fix: handle detached HEAD in status");

        let bare = Commit::parse_oneline("3f2a9c1e8b7d").unwrap();
        assert_eq!(bare.description, "");

        assert!(Commit::parse_oneline("   ").is_none());
    }
}
