//! Captured result of one git execution

use crate::command::GitCommand;
use camino::{Utf8Path, Utf8PathBuf};

/// Completion state of an execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Not yet resolved; reported by [`Background::state`](crate::Background::state)
    Pending,
    /// Exited with status 0
    Succeeded,
    /// Exited non-zero or was killed by a signal
    Failed,
}

/// One finished git execution with its captured output
#[derive(Debug, Clone)]
pub struct ProcessHandle {
    command: GitCommand,
    working_dir: Utf8PathBuf,
    stdout: Vec<String>,
    stderr: Vec<String>,
    exit_code: Option<i32>,
    signal: Option<i32>,
}

impl ProcessHandle {
    pub(crate) fn new(
        command: GitCommand,
        working_dir: &Utf8Path,
        stdout: &[u8],
        stderr: &[u8],
        exit_code: Option<i32>,
        signal: Option<i32>,
    ) -> Self {
        Self {
            command,
            working_dir: working_dir.to_path_buf(),
            stdout: split_lines(stdout),
            stderr: split_lines(stderr),
            exit_code,
            signal,
        }
    }

    /// The command that was run
    pub fn command(&self) -> &GitCommand {
        &self.command
    }

    /// Directory git ran in
    pub fn working_dir(&self) -> &Utf8Path {
        &self.working_dir
    }

    /// Captured stdout, one entry per line
    pub fn stdout(&self) -> &[String] {
        &self.stdout
    }

    /// Captured stderr, one entry per line
    pub fn stderr(&self) -> &[String] {
        &self.stderr
    }

    /// Exit code, absent when the process was killed by a signal
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Terminating signal, if any
    pub fn signal(&self) -> Option<i32> {
        self.signal
    }

    pub fn state(&self) -> ProcessState {
        if self.exit_code == Some(0) && self.signal.is_none() {
            ProcessState::Succeeded
        } else {
            ProcessState::Failed
        }
    }

    pub fn success(&self) -> bool {
        self.state() == ProcessState::Succeeded
    }

    /// Exit code, or the signal number when the exit code is zero or missing
    pub fn failure_code(&self) -> i32 {
        match (self.exit_code, self.signal) {
            (Some(code), _) if code != 0 => code,
            (_, Some(signal)) => signal,
            (Some(code), None) => code,
            (None, None) => -1,
        }
    }

    /// Last non-empty stdout line, trimmed
    pub fn last_line(&self) -> Option<&str> {
        self.stdout
            .iter()
            .rev()
            .map(|line| line.trim())
            .find(|line| !line.is_empty())
    }
}

fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(stdout: &str, exit: Option<i32>, signal: Option<i32>) -> ProcessHandle {
        ProcessHandle::new(
            GitCommand::builder("status").build(),
            Utf8Path::new("/tmp"),
            stdout.as_bytes(),
            b"",
            exit,
            signal,
        )
    }

    #[test]
    fn test_state_from_exit_status() {
        assert_eq!(handle("", Some(0), None).state(), ProcessState::Succeeded);
        assert_eq!(handle("", Some(128), None).state(), ProcessState::Failed);
        assert_eq!(handle("", None, Some(9)).state(), ProcessState::Failed);
    }

    #[test]
    fn test_failure_code_prefers_exit_then_signal() {
        assert_eq!(handle("", Some(128), None).failure_code(), 128);
        assert_eq!(handle("", None, Some(15)).failure_code(), 15);
        assert_eq!(handle("", Some(0), Some(9)).failure_code(), 9);
        assert_eq!(handle("", None, None).failure_code(), -1);
    }

    #[test]
    fn test_last_line_skips_trailing_blanks() {
        let h = handle("warning: noise\nmain\n\n", Some(0), None);
        assert_eq!(h.stdout().len(), 3);
        assert_eq!(h.last_line(), Some("main"));
        assert_eq!(handle("", Some(0), None).last_line(), None);
    }
}
