//! mergeq binary entry point

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::context::{CommandContext, ConfigOverrides};
use cli::run::{run_run, RunOptions};
use cli::status::run_status;
use merge_queue::types::MergeMethod;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Label-driven merge queue for GitHub pull requests
#[derive(Parser)]
#[command(name = "mergeq", version, about)]
struct Cli {
    /// Repository slug (owner/name); defaults to $GITHUB_REPOSITORY
    #[arg(long, global = true)]
    repo: Option<String>,

    /// GitHub Enterprise host (defaults to github.com)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Path to the configuration file
    #[arg(long, global = true, default_value = "mergeq.toml")]
    config: PathBuf,

    /// Base branch PRs are merged into (overrides config)
    #[arg(long, global = true)]
    base: Option<String>,

    /// Queue label name (overrides config)
    #[arg(long, global = true)]
    label: Option<String>,

    /// Merge method: squash, merge, or rebase (overrides config)
    #[arg(long, global = true)]
    method: Option<MergeMethod>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one queue cycle: select, evaluate, act, exit
    Run {
        /// Show what the cycle would do without acting
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the queue and the next candidate
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        base_branch: cli.base,
        label: cli.label,
        merge_method: cli.method,
    };
    let ctx = CommandContext::new(&cli.config, cli.repo.as_deref(), cli.host, overrides)?;

    match cli.command {
        Commands::Run { dry_run } => run_run(&ctx, RunOptions { dry_run }).await?,
        Commands::Status => run_status(&ctx).await?,
    }

    Ok(())
}
