//! git command construction
//!
//! A [`GitCommand`] is an immutable argument vector for one git invocation.
//! It is assembled with [`GitCommandBuilder`] from a subcommand token,
//! options and positional arguments, and rendered by [`GitCommand::args`].
//!
//! Rendering order is fixed:
//!
//! ```text
//! <subcommand tokens> <options...> <positional args...> [-- <paths...>]
//! ```
//!
//! Compound tokens such as `remote-add` or `stash-pop` name two-word git
//! commands and are split into `remote add` / `stash pop`. Nothing is quoted:
//! the vector is handed to the OS as discrete arguments.

use std::fmt;

/// git commands whose subcommands are separate words (`git remote add`)
const COMMAND_GROUPS: &[&str] = &[
    "bisect",
    "notes",
    "remote",
    "stash",
    "submodule",
    "worktree",
];

/// Value attached to an option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// `--flag`
    Flag,
    /// `--flag value`
    Value(String),
    /// `--flag=value`, for flags whose value is optional (`--pretty=oneline`)
    Joined(String),
    /// `--flag a --flag b`
    Repeated(Vec<String>),
}

/// Immutable git invocation: subcommand, options, arguments and paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    subcommand: Vec<String>,
    options: Vec<(String, OptionValue)>,
    args: Vec<String>,
    paths: Option<Vec<String>>,
}

impl GitCommand {
    /// Start building a command for `subcommand`
    pub fn builder(subcommand: &str) -> GitCommandBuilder {
        GitCommandBuilder::new(subcommand)
    }

    /// Subcommand tokens after translation (`["remote", "add"]`)
    pub fn subcommand(&self) -> &[String] {
        &self.subcommand
    }

    /// Positional arguments in insertion order
    pub fn positional(&self) -> &[String] {
        &self.args
    }

    /// Options in insertion order
    pub fn options(&self) -> &[(String, OptionValue)] {
        &self.options
    }

    /// Whether an option named `name` is present
    pub fn has_option(&self, name: &str) -> bool {
        self.options.iter().any(|(n, _)| n == name)
    }

    /// Flat argument vector, without the executable
    pub fn args(&self) -> Vec<String> {
        let mut out = self.subcommand.clone();

        for (name, value) in &self.options {
            let flag = render_flag(name);
            match value {
                OptionValue::Flag => out.push(flag),
                OptionValue::Value(v) => {
                    out.push(flag);
                    out.push(v.clone());
                }
                OptionValue::Joined(v) => out.push(format!("{}={}", flag, v)),
                OptionValue::Repeated(values) => {
                    for v in values {
                        out.push(flag.clone());
                        out.push(v.clone());
                    }
                }
            }
        }

        out.extend(self.args.iter().cloned());

        if let Some(paths) = &self.paths {
            out.push("--".to_string());
            out.extend(paths.iter().cloned());
        }

        out
    }
}

impl fmt::Display for GitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "git {}", self.args().join(" "))
    }
}

fn render_flag(name: &str) -> String {
    if name.chars().count() == 1 {
        format!("-{}", name)
    } else {
        format!("--{}", name)
    }
}

/// Split a compound token (`remote-add`) into its git words
fn translate_subcommand(token: &str) -> (String, Option<String>) {
    if let Some((group, verb)) = token.split_once('-') {
        if COMMAND_GROUPS.contains(&group) && !verb.is_empty() {
            return (group.to_string(), Some(verb.to_string()));
        }
    }
    (token.to_string(), None)
}

/// Builder for [`GitCommand`]
#[derive(Debug, Clone)]
pub struct GitCommandBuilder {
    subcommand: Vec<String>,
    options: Vec<(String, OptionValue)>,
    args: Vec<String>,
    paths: Option<Vec<String>>,
}

impl GitCommandBuilder {
    /// Create a builder; compound tokens are translated here
    pub fn new(subcommand: &str) -> Self {
        let (base, verb) = translate_subcommand(subcommand);
        let mut tokens = vec![base];
        tokens.extend(verb);
        Self {
            subcommand: tokens,
            options: Vec::new(),
            args: Vec::new(),
            paths: None,
        }
    }

    /// Append a positional argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several positional arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add a boolean flag
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.option(name, OptionValue::Flag)
    }

    /// Add a boolean flag only when `enabled`
    pub fn flag_if(self, name: impl Into<String>, enabled: bool) -> Self {
        if enabled {
            self.flag(name)
        } else {
            self
        }
    }

    /// Add a flag followed by one value token
    pub fn value(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.option(name, OptionValue::Value(value.into()))
    }

    /// Add a `--name=value` option
    pub fn joined(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.option(name, OptionValue::Joined(value.into()))
    }

    /// Add a flag repeated once per value
    pub fn repeated<I, S>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.option(
            name,
            OptionValue::Repeated(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Add an option; a later option with the same name replaces the earlier one
    pub fn option(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        let name = name.into();
        match self.options.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.options.push((name, value)),
        }
        self
    }

    /// Paths rendered after a `--` terminator
    pub fn paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths
            .get_or_insert_with(Vec::new)
            .extend(paths.into_iter().map(Into::into));
        self
    }

    /// Freeze the command
    pub fn build(self) -> GitCommand {
        GitCommand {
            subcommand: self.subcommand,
            options: self.options,
            args: self.args,
            paths: self.paths,
        }
    }
}
