//! Error types for gitbind-core

use crate::process::ProcessHandle;
use thiserror::Error;

/// Result type alias using gitbind-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while driving the git binary
#[derive(Error, Debug)]
pub enum Error {
    /// Caller supplied an unusable argument (checked before spawning git)
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Path exists but is not a git working tree
    #[error("Not a git repository (missing .git/config): {path}")]
    NotARepository { path: String },

    /// git exited non-zero or was killed by a signal
    #[error("git {subcommand} failed ({code}){}", message_suffix(.message))]
    Execution {
        subcommand: String,
        message: String,
        code: i32,
        process: Box<ProcessHandle>,
    },

    /// Operation needs a configured user identity
    #[error("Git user identity is not configured (missing {missing})")]
    MissingIdentity { missing: String },

    /// Configured git binary is unusable
    #[error("Invalid git binary at {path}: {reason}")]
    InvalidBinary { path: String, reason: String },

    /// Local branch was deleted but the remote delete failed
    #[error("Branch '{branch}' deleted locally but remote delete failed: {source}")]
    PartialBranchDeletion {
        branch: String,
        #[source]
        source: Box<Error>,
    },

    /// A git config file exists but could not be parsed
    #[error("Failed to parse git config {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// gitbind settings are invalid
    #[error("Invalid settings: {message}")]
    Settings { message: String },

    /// A background task did not run to completion
    #[error("Background task failed: {message}")]
    BackgroundTask { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a not-a-repository error
    pub fn not_a_repository(path: impl Into<String>) -> Self {
        Self::NotARepository { path: path.into() }
    }

    /// Create a missing identity error
    pub fn missing_identity(missing: impl Into<String>) -> Self {
        Self::MissingIdentity {
            missing: missing.into(),
        }
    }

    /// Create an invalid binary error
    pub fn invalid_binary(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBinary {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a config parse error
    pub fn config_parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a settings error
    pub fn settings(message: impl Into<String>) -> Self {
        Self::Settings {
            message: message.into(),
        }
    }

    /// Create a background task error
    pub fn background_task(message: impl Into<String>) -> Self {
        Self::BackgroundTask {
            message: message.into(),
        }
    }

    /// The process handle behind an execution failure, if any
    pub fn process(&self) -> Option<&ProcessHandle> {
        match self {
            Self::Execution { process, .. } => Some(process),
            Self::PartialBranchDeletion { source, .. } => source.process(),
            _ => None,
        }
    }

    /// Whether the caller's input was rejected before any git process ran
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::NotARepository { .. }
        )
    }

    /// Whether this error came from a failed git invocation
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution { .. })
    }

    /// Whether any captured stderr line of the failed invocation contains `needle`
    pub fn stderr_contains(&self, needle: &str) -> bool {
        self.process()
            .map(|p| p.stderr().iter().any(|line| line.contains(needle)))
            .unwrap_or(false)
    }
}

fn message_suffix(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(": {}", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::GitCommand;
    use camino::Utf8Path;

    fn execution(message: &str) -> Error {
        let process = ProcessHandle::new(
            GitCommand::builder("remote-remove").arg("nope").build(),
            Utf8Path::new("/repo"),
            b"",
            b"",
            Some(2),
            None,
        );
        Error::Execution {
            subcommand: "remote remove".to_string(),
            message: message.to_string(),
            code: 2,
            process: Box::new(process),
        }
    }

    #[test]
    fn test_execution_display_omits_empty_message() {
        assert_eq!(
            execution("").to_string(),
            "git remote remove failed (2)"
        );
        assert_eq!(
            execution("No such remote: 'nope'").to_string(),
            "git remote remove failed (2): No such remote: 'nope'"
        );
    }

    #[test]
    fn test_constructor_messages() {
        let err = Error::not_a_repository("/tmp/x");
        assert_eq!(
            err.to_string(),
            "Not a git repository (missing .git/config): /tmp/x"
        );

        let err = Error::missing_identity("user.email");
        assert!(err.to_string().contains("user.email"));
        assert!(err.process().is_none());
        assert!(!err.is_execution());
        assert!(!err.is_invalid_argument());

        assert!(Error::not_a_repository("/tmp/x").is_invalid_argument());
        assert!(Error::invalid_argument("bad").is_invalid_argument());
    }
}
