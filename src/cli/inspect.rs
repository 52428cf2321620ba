//! Inspect command - show how a PR was merged without touching anything

use crate::cli::style::{Stylize, arrow, check, link};
use crate::cli::{CommandContext, CommandError, RepoOptions};
use anstream::println;
use gh_cherry_pick::cherry_pick::plan_reconstruction;
use gh_cherry_pick::repo::WorkingCopy;

/// Run the inspect command
#[allow(clippy::future_not_send)]
pub async fn run_inspect(options: &RepoOptions, pr_number: u64) -> Result<(), CommandError> {
    let ctx = CommandContext::new(options).await?;

    let pr = ctx.platform.get_pull_request(pr_number).await?;
    let state = ctx.repo.state().await?;

    println!(
        "{} {}",
        format!("PR #{}:", pr.number).emphasis(),
        link(&pr.title, &pr.html_url)
    );
    println!(
        "  {} {} {} {}",
        pr.head_ref.accent(),
        arrow(),
        pr.base_ref.accent(),
        format!("by {}", pr.author.as_deref().unwrap_or("ghost")).muted()
    );
    println!("  Status: {}", pr.status_label());

    println!();
    println!("{} {}", "Working copy:".emphasis(), ctx.root().display());
    if state.is_dirty {
        println!("  {}", "Uncommitted changes present".warn());
    }
    if state.is_in_rebase_or_am {
        println!("  {}", "Rebase or git am in progress".warn());
    }
    if !state.is_dirty && !state.is_in_rebase_or_am {
        println!("  {} clean", check());
    }

    println!();
    if !pr.merged {
        println!(
            "{}",
            format!("Not merged ({}); nothing to cherry-pick yet.", pr.status_label()).muted()
        );
        return Ok(());
    }

    let strategy = ctx.platform.merge_strategy_for(&pr).await?;
    let reconstruction = plan_reconstruction(&pr, strategy)?;
    println!("{} {}", "Merge strategy:".emphasis(), strategy.accent());
    println!("  {} {}", arrow(), reconstruction);

    Ok(())
}
