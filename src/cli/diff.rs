//! Diff command - print a PR's diff or patch series

use crate::cli::{CommandContext, CommandError, RepoOptions};
use anstream::print;
use gh_cherry_pick::types::DiffFormat;

/// Run the diff command
#[allow(clippy::future_not_send)]
pub async fn run_diff(
    options: &RepoOptions,
    pr_number: u64,
    patch: bool,
) -> Result<(), CommandError> {
    let ctx = CommandContext::new(options).await?;

    let format = if patch {
        DiffFormat::Patch
    } else {
        DiffFormat::Diff
    };
    let text = ctx.platform.get_pull_request_diff(pr_number, format).await?;
    print!("{text}");

    Ok(())
}
