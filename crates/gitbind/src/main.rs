//! gitbind CLI - drive git repositories through the gitbind binding
//!
//! This is the main entry point for the gitbind command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let ctx = commands::Context::from_cli(&cli)?;

    match cli.command {
        Commands::Init(args) => commands::init::run(&ctx, args).await,
        Commands::Clone(args) => commands::clone::run(&ctx, args).await,
        Commands::Info(args) => commands::info::run(&ctx, args),
        Commands::Branch(cmd) => commands::branch::run(&ctx, cmd).await,
        Commands::Remote(cmd) => commands::remote::run(&ctx, cmd).await,
        Commands::Log(args) => commands::log::run(&ctx, args).await,
        Commands::IsCommit(args) => commands::log::is_commit(&ctx, args).await,
        Commands::Fetch(args) => commands::sync::fetch(&ctx, args).await,
        Commands::Pull => commands::sync::pull(&ctx).await,
        Commands::Push(args) => commands::sync::push(&ctx, args).await,
        Commands::Stash(cmd) => commands::stash::run(&ctx, cmd).await,
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
