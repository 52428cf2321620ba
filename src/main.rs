//! gh-cherry-pick CLI entry point

mod cli;

use anstream::eprintln;
use clap::{Parser, Subcommand};
use cli::style::Stylize;
use cli::{CommandError, RepoOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Cherry-pick merged GitHub PRs onto another branch
#[derive(Parser)]
#[command(name = "gh-cherry-pick", version, about)]
struct Cli {
    /// Path to the git working copy
    #[arg(long, global = true, default_value = ".")]
    path: PathBuf,

    /// Remote to fetch from and push to
    #[arg(long, global = true, default_value = "origin")]
    remote: String,

    /// GitHub repository as owner/name (detected from the remote by default)
    #[arg(long, global = true)]
    repo: Option<String>,

    /// GitHub Enterprise host
    #[arg(long, global = true, env = "GH_HOST")]
    host: Option<String>,

    /// GitHub token (falls back to GITHUB_TOKEN, GH_TOKEN, then `gh auth token`)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reproduce a merged PR on a new branch off another branch and push it
    Pick {
        /// Pull request number
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        pr: u64,

        /// Branch to cherry-pick onto
        #[arg(long)]
        onto: String,
    },
    /// Show a PR's state and how it would be cherry-picked (read-only)
    Inspect {
        /// Pull request number
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        pr: u64,
    },
    /// Print a PR's diff
    Diff {
        /// Pull request number
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        pr: u64,

        /// Print the per-commit patch series instead of a flattened diff
        #[arg(long)]
        patch: bool,
    },
    /// Show where the GitHub token comes from and verify it
    Auth,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gh_cherry_pick={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = RepoOptions {
        path: cli.path,
        remote: cli.remote,
        repo: cli.repo,
        host: cli.host,
        token: cli.token,
    };

    let result = match cli.command {
        Commands::Pick { pr, onto } => cli::run_pick(&options, pr, &onto).await,
        Commands::Inspect { pr } => cli::run_inspect(&options, pr).await,
        Commands::Diff { pr, patch } => cli::run_diff(&options, pr, patch).await,
        Commands::Auth => cli::run_auth(&options).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError {
            message,
            code,
            kind,
        }) => {
            eprintln!("{} {message}", format!("error[{kind}]:").error());
            ExitCode::from(code)
        }
    }
}
