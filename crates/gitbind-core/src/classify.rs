//! Failure classification for git stderr
//!
//! git prints progress and warnings before the line that actually explains a
//! failure. Only the tail starting at the first `fatal:` line is kept.

use crate::error::Error;
use crate::process::ProcessHandle;
use regex::Regex;
use std::sync::LazyLock;

static FATAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*fatal:\s*").expect("fatal regex is valid"));

/// Actionable message from captured stderr lines
///
/// Lines before the first `fatal:` line are dropped, the prefix is stripped,
/// and the remainder is joined with spaces. Returns an empty string when no
/// line matches.
pub fn classify_stderr<S: AsRef<str>>(lines: &[S]) -> String {
    let Some(start) = lines.iter().position(|l| FATAL_RE.is_match(l.as_ref())) else {
        return String::new();
    };

    let mut parts = Vec::with_capacity(lines.len() - start);
    parts.push(FATAL_RE.replace(lines[start].as_ref(), "").into_owned());
    parts.extend(lines[start + 1..].iter().map(|l| l.as_ref().to_string()));

    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turn a failed execution into [`Error::Execution`]
pub fn execution_error(process: ProcessHandle) -> Error {
    let message = classify_stderr(process.stderr());
    let code = process.failure_code();
    let subcommand = process.command().subcommand().join(" ");
    Error::Execution {
        subcommand,
        message,
        code,
        process: Box::new(process),
    }
}
