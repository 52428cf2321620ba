//! Reconstruction planning - pure functions
//!
//! Turns a classified PR into the single reconstruction technique to apply.
//! No I/O happens here.

use crate::error::{Error, Result};
use crate::types::{MergeStrategy, PullRequest};

/// How to reproduce a merged PR on a new branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconstruction {
    /// Rebase merge: apply the PR's original per-commit patch series
    ApplyPatchSeries {
        /// PR whose patch series is fetched and applied
        pr_number: u64,
    },
    /// Squash merge: cherry-pick the single squash commit
    CherryPickCommit {
        /// The squash commit on the base branch
        commit: String,
    },
}

impl Reconstruction {
    /// The merge strategy this reconstruction handles
    pub const fn strategy(&self) -> MergeStrategy {
        match self {
            Self::ApplyPatchSeries { .. } => MergeStrategy::Rebase,
            Self::CherryPickCommit { .. } => MergeStrategy::Squash,
        }
    }
}

impl std::fmt::Display for Reconstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApplyPatchSeries { pr_number } => {
                write!(f, "apply patch series of PR #{pr_number} (git am -3)")
            }
            Self::CherryPickCommit { commit } => {
                let short = commit.get(..12).unwrap_or(commit);
                write!(f, "cherry-pick squash commit {short}")
            }
        }
    }
}

/// Choose the reconstruction for a merged PR (PURE - no I/O)
///
/// Fails with `Error::Unmerged` if the PR has no merge commit.
pub fn plan_reconstruction(pr: &PullRequest, strategy: MergeStrategy) -> Result<Reconstruction> {
    let merge_commit = pr.merged_commit().ok_or_else(|| Error::Unmerged {
        number: pr.number,
        state: pr.status_label().to_string(),
    })?;

    Ok(match strategy {
        MergeStrategy::Rebase => Reconstruction::ApplyPatchSeries {
            pr_number: pr.number,
        },
        MergeStrategy::Squash => Reconstruction::CherryPickCommit {
            commit: merge_commit.to_string(),
        },
    })
}
