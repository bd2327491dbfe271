//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// gitbind - drive git repositories through a typed binding
#[derive(Parser, Debug)]
#[command(name = "gitbind")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Repository directory
    #[arg(short = 'C', long = "repo", global = true, default_value = ".")]
    pub repo: Utf8PathBuf,

    /// Path to the git binary (overrides settings)
    #[arg(long, global = true, env = "GITBIND_GIT_BINARY")]
    pub git: Option<Utf8PathBuf>,

    /// Path to a gitbind settings file
    #[arg(long, global = true)]
    pub settings: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a repository
    Init(InitArgs),

    /// Clone a repository
    Clone(CloneArgs),

    /// Show remotes, tracked branches and identity from the config mirror
    Info(InfoArgs),

    /// Branch management
    #[command(subcommand)]
    Branch(BranchCommands),

    /// Remote management
    #[command(subcommand)]
    Remote(RemoteCommands),

    /// Show commit history
    Log(LogArgs),

    /// Check whether a revision names a commit
    IsCommit(IsCommitArgs),

    /// Fetch from the default remote
    Fetch(FetchArgs),

    /// Pull the current branch
    Pull,

    /// Push to a remote
    Push(PushArgs),

    /// Stash management
    #[command(subcommand)]
    Stash(StashCommands),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: --repo)
    pub path: Option<Utf8PathBuf>,

    /// Remote URL to add as the default remote
    #[arg(long)]
    pub remote: Option<String>,
}

#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Repository URL
    pub url: String,

    /// Destination directory
    pub path: Utf8PathBuf,

    /// Clone in the background and report when done
    #[arg(long)]
    pub background: bool,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum BranchCommands {
    /// List local branches
    List(ListBranchesArgs),

    /// Print the current branch
    Current,

    /// Check out a ref, optionally creating a branch
    Checkout(CheckoutArgs),

    /// Delete a branch
    Delete(DeleteBranchArgs),
}

#[derive(Args, Debug)]
pub struct ListBranchesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CheckoutArgs {
    /// Ref to check out
    pub refspec: String,

    /// Create a new branch
    #[arg(short = 'b', long)]
    pub create: bool,

    /// Name for the new branch (default: the ref)
    #[arg(long, requires = "create")]
    pub name: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteBranchArgs {
    /// Branch to delete
    pub branch: String,

    /// Delete even if unmerged
    #[arg(short, long)]
    pub force: bool,

    /// Also delete the branch on the default remote
    #[arg(long)]
    pub remote: bool,
}

#[derive(Subcommand, Debug)]
pub enum RemoteCommands {
    /// Add a remote
    Add { name: String, url: String },

    /// Remove a remote
    Remove { name: String },

    /// Rename a remote
    Rename { old: String, new: String },

    /// List remotes
    List(ListRemotesArgs),
}

#[derive(Args, Debug)]
pub struct ListRemotesArgs {
    /// Only show this remote
    pub name: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Commits to skip
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Maximum commits to show (default: all)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct IsCommitArgs {
    /// Revision to check
    pub sha: String,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Also fetch tags
    #[arg(long)]
    pub tags: bool,
}

#[derive(Args, Debug)]
pub struct PushArgs {
    /// Remote name
    pub remote: Option<String>,

    /// Refspec to push (requires a remote)
    #[arg(requires = "remote")]
    pub refspec: Option<String>,

    /// Set upstream tracking
    #[arg(short = 'u', long)]
    pub set_upstream: bool,
}

#[derive(Subcommand, Debug)]
pub enum StashCommands {
    /// Stash local changes
    Push,

    /// Apply and drop the latest stash
    Pop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_checkout_create_named() {
        let cli = Cli::try_parse_from([
            "gitbind", "-C", "/tmp/repo", "branch", "checkout", "main", "-b", "--name", "hotfix",
        ])
        .unwrap();

        assert_eq!(cli.repo, "/tmp/repo");
        match cli.command {
            Commands::Branch(BranchCommands::Checkout(args)) => {
                assert_eq!(args.refspec, "main");
                assert!(args.create);
                assert_eq!(args.name.as_deref(), Some("hotfix"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_name_requires_create() {
        let result = Cli::try_parse_from([
            "gitbind", "branch", "checkout", "main", "--name", "hotfix",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_log_defaults() {
        let cli = Cli::try_parse_from(["gitbind", "log", "-n", "5"]).unwrap();
        match cli.command {
            Commands::Log(args) => {
                assert_eq!(args.offset, 0);
                assert_eq!(args.limit, Some(5));
                assert!(!args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_remote_rename_and_global_flags() {
        let cli =
            Cli::try_parse_from(["gitbind", "-vv", "remote", "rename", "origin", "fork"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Remote(RemoteCommands::Rename { ref old, ref new })
                if old == "origin" && new == "fork"
        ));
    }

    #[test]
    fn test_push_refspec_requires_remote() {
        let cli = Cli::try_parse_from(["gitbind", "push", "origin", "main", "-u"]).unwrap();
        match cli.command {
            Commands::Push(args) => {
                assert_eq!(args.remote.as_deref(), Some("origin"));
                assert_eq!(args.refspec.as_deref(), Some("main"));
                assert!(args.set_upstream);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
