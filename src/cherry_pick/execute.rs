//! Reconstruction execution - effectful operations

use crate::cherry_pick::plan::Reconstruction;
use crate::error::Result;
use crate::platform::PlatformService;
use crate::repo::WorkingCopy;
use crate::types::DiffFormat;
use tracing::debug;

/// Apply a reconstruction to the currently checked out branch (EFFECTFUL)
///
/// On failure the working copy is left exactly as git left it (mid-am or with
/// cherry-pick conflicts) so the user can resolve or abort by hand.
pub async fn reconstruct(
    reconstruction: &Reconstruction,
    platform: &dyn PlatformService,
    repo: &dyn WorkingCopy,
) -> Result<()> {
    match reconstruction {
        Reconstruction::ApplyPatchSeries { pr_number } => {
            let patch = platform
                .get_pull_request_diff(*pr_number, DiffFormat::Patch)
                .await?;
            debug!(pr_number = *pr_number, bytes = patch.len(), "applying patch series");
            repo.apply_patch(&patch).await
        }
        Reconstruction::CherryPickCommit { commit } => {
            debug!(commit = %commit, "cherry-picking squash commit");
            repo.cherry_pick(commit).await
        }
    }
}
