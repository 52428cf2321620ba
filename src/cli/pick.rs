//! Pick command - reproduce a merged PR onto another branch

use crate::cli::style::{Stylize, check, link};
use crate::cli::{CliProgress, CommandContext, CommandError, RepoOptions};
use anstream::println;
use gh_cherry_pick::cherry_pick::{CherryPickRequest, Stage, run_cherry_pick, validate_onto};
use gh_cherry_pick::error::Error;

/// Run the pick command
#[allow(clippy::future_not_send)]
pub async fn run_pick(
    options: &RepoOptions,
    pr_number: u64,
    onto: &str,
) -> Result<(), CommandError> {
    validate_onto(onto)?;

    let ctx = CommandContext::new(options).await?;

    let mut request = CherryPickRequest::new(pr_number, onto);
    request.remote.clone_from(&ctx.remote_name);
    let branch = request.branch_name();

    println!(
        "{} PR {} onto {}",
        "Cherry-picking".emphasis(),
        format!("#{pr_number}").accent(),
        request.start_point().accent()
    );

    let progress = CliProgress::compact();
    let result = run_cherry_pick(&request, ctx.platform.as_ref(), &ctx.repo, &progress).await;

    match result {
        Ok(outcome) => {
            let compare_url = format!(
                "{}/compare/{}...{}?expand=1",
                ctx.platform.config().web_url(),
                request.onto,
                outcome.branch
            );
            println!();
            println!(
                "{} Pushed {} ({} merge of {})",
                check(),
                outcome.branch.accent(),
                outcome.strategy,
                format!("#{}", outcome.pr.number).accent()
            );
            println!("   {}", link("Open a pull request", &compare_url).muted());
            Ok(())
        }
        Err(err) => {
            println!();
            print_recovery_hint(err.stage, &err.source, &branch);
            Err(err.into())
        }
    }
}

/// Explain what state the failed run left behind
fn print_recovery_hint(stage: Stage, error: &Error, branch: &str) {
    match error {
        Error::PatchApply(_) => {
            println!(
                "{}",
                "Patch series stopped on a conflict. Resolve it and run 'git am --continue',"
                    .warn()
            );
            println!("{}", "or run 'git am --abort' to give up.".warn());
        }
        Error::CherryPick(_) => {
            println!("{}", "Cherry-pick stopped on a conflict. Resolve it and run".warn());
            println!(
                "{}",
                "'git cherry-pick --continue', or 'git cherry-pick --abort' to give up.".warn()
            );
        }
        _ if stage.is_mutating() => {
            println!(
                "{}",
                format!("Failed while trying to {stage}; check 'git status' before retrying.")
                    .warn()
            );
        }
        _ => {}
    }

    // The branch exists from BranchCreated onward and is never removed
    if matches!(
        stage,
        Stage::StrategyDetermined | Stage::Reconstructed | Stage::Pushed
    ) {
        println!(
            "   {} {}",
            "Branch left checked out:".muted(),
            branch.accent()
        );
    }
}
