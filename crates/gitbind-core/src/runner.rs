//! git process execution
//!
//! [`GitRunner`] owns the location of the git binary and the environment
//! passed to every child. Commands are spawned with an explicit argument
//! vector and working directory; stdout and stderr are captured into
//! line buffers on a [`ProcessHandle`].

use crate::background::Background;
use crate::classify::execution_error;
use crate::command::GitCommand;
use crate::error::{Error, Result};
use crate::process::ProcessHandle;
use crate::settings::GitSettings;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Locale variables pinned on every child
const FORCED_LOCALE: [(&str, &str); 2] = [("LC_ALL", "C"), ("LANGUAGE", "C")];

/// Runs [`GitCommand`]s against a validated git binary
#[derive(Debug, Clone)]
pub struct GitRunner {
    binary: Utf8PathBuf,
    env: BTreeMap<String, String>,
}

impl GitRunner {
    /// Create a runner, validating the configured binary once
    pub fn new(settings: &GitSettings) -> Result<Self> {
        validate_binary(&settings.binary)?;

        let mut env = settings.env.clone();
        if settings.disable_prompt {
            env.entry("GIT_TERMINAL_PROMPT".to_string())
                .or_insert_with(|| "0".to_string());
        }
        // stderr classification matches git's untranslated messages
        for (key, value) in FORCED_LOCALE {
            env.insert(key.to_string(), value.to_string());
        }

        Ok(Self {
            binary: settings.binary.clone(),
            env,
        })
    }

    /// Path of the git executable
    pub fn binary(&self) -> &Utf8Path {
        &self.binary
    }

    /// Run `command` in `dir` and capture its output, whatever the exit status
    ///
    /// Only a failure to spawn the process is an error here.
    pub async fn capture(&self, command: &GitCommand, dir: &Utf8Path) -> Result<ProcessHandle> {
        let args = command.args();
        debug!("Running in {}: {} {}", dir, self.binary, args.join(" "));

        let mut cmd = Command::new(self.binary.as_std_path());
        cmd.args(&args)
            .current_dir(dir)
            .envs(&self.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = cmd.output().await?;

        let handle = ProcessHandle::new(
            command.clone(),
            dir,
            &output.stdout,
            &output.stderr,
            output.status.code(),
            exit_signal(&output.status),
        );

        debug!(
            "git {} finished: {:?} ({} stdout lines, {} stderr lines)",
            command.subcommand().join(" "),
            handle.state(),
            handle.stdout().len(),
            handle.stderr().len()
        );

        Ok(handle)
    }

    /// Run `command` in `dir`; non-zero exit or signal becomes [`Error::Execution`]
    pub async fn exec(&self, command: &GitCommand, dir: &Utf8Path) -> Result<ProcessHandle> {
        let handle = self.capture(command, dir).await?;
        if handle.success() {
            Ok(handle)
        } else {
            Err(execution_error(handle))
        }
    }

    /// Start `command` without waiting; the result arrives through the handle
    pub fn spawn(&self, command: GitCommand, dir: &Utf8Path) -> Background<ProcessHandle> {
        let runner = self.clone();
        let dir = dir.to_path_buf();
        Background::spawn(async move { runner.exec(&command, &dir).await })
    }
}

fn validate_binary(binary: &Utf8Path) -> Result<()> {
    if !binary.is_absolute() {
        return Err(Error::invalid_binary(
            binary.as_str(),
            "path must be absolute",
        ));
    }

    let metadata = std::fs::metadata(binary)
        .map_err(|e| Error::invalid_binary(binary.as_str(), e.to_string()))?;

    if !metadata.is_file() {
        return Err(Error::invalid_binary(binary.as_str(), "not a regular file"));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(Error::invalid_binary(binary.as_str(), "not executable"));
        }
    }

    Ok(())
}

#[cfg(unix)]
fn exit_signal(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessState;
    use tempfile::TempDir;

    fn runner() -> GitRunner {
        GitRunner::new(&GitSettings::discover()).expect("git must be installed for tests")
    }

    fn temp_path(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_locale_is_pinned_over_settings_env() {
        let mut settings = GitSettings::discover();
        settings
            .env
            .insert("LANGUAGE".to_string(), "de".to_string());
        settings
            .env
            .insert("GIT_AUTHOR_NAME".to_string(), "Runner Test".to_string());

        let runner = GitRunner::new(&settings).unwrap();
        assert_eq!(runner.env.get("LANGUAGE").map(String::as_str), Some("C"));
        assert_eq!(runner.env.get("LC_ALL").map(String::as_str), Some("C"));
        assert_eq!(
            runner.env.get("GIT_AUTHOR_NAME").map(String::as_str),
            Some("Runner Test")
        );
        assert_eq!(
            runner.env.get("GIT_TERMINAL_PROMPT").map(String::as_str),
            Some("0")
        );
    }

    #[test]
    fn test_missing_binary_is_rejected() {
        let settings = GitSettings::default().with_binary("/nonexistent/bin/git");
        let err = GitRunner::new(&settings).unwrap_err();
        assert!(matches!(err, Error::InvalidBinary { .. }));
    }

    #[test]
    fn test_relative_binary_is_rejected() {
        let settings = GitSettings::default().with_binary("git");
        let err = GitRunner::new(&settings).unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_binary_is_rejected() {
        let dir = TempDir::new().unwrap();
        let fake = temp_path(&dir).join("git");
        std::fs::write(&fake, "not a program").unwrap();

        let settings = GitSettings::default().with_binary(fake);
        let err = GitRunner::new(&settings).unwrap_err();
        assert!(err.to_string().contains("not executable"));
    }

    #[tokio::test]
    async fn test_capture_success() {
        let dir = TempDir::new().unwrap();
        let cmd = GitCommand::builder("version").build();

        let handle = runner().capture(&cmd, &temp_path(&dir)).await.unwrap();
        assert_eq!(handle.state(), ProcessState::Succeeded);
        assert!(handle.last_line().unwrap().starts_with("git version"));
    }

    #[tokio::test]
    async fn test_exec_failure_is_classified() {
        let dir = TempDir::new().unwrap();
        let cmd = GitCommand::builder("rev-parse")
            .flag("verify")
            .arg("HEAD")
            .build();

        let err = runner().exec(&cmd, &temp_path(&dir)).await.unwrap_err();
        match err {
            Error::Execution {
                subcommand,
                message,
                code,
                process,
            } => {
                assert_eq!(subcommand, "rev-parse");
                assert!(message.contains("not a git repository"), "{message}");
                assert_ne!(code, 0);
                assert_eq!(process.state(), ProcessState::Failed);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_spawn_resolves_in_background() {
        let dir = TempDir::new().unwrap();
        let path = temp_path(&dir);

        let bg = runner().spawn(GitCommand::builder("init").flag("quiet").build(), &path);
        let handle = bg.wait().await.unwrap();

        assert!(handle.success());
        assert!(path.join(".git").join("config").exists());
    }
}
