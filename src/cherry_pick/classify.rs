//! Merge strategy classification - pure decision logic

use crate::types::MergeStrategy;

/// Decide the merge strategy from the PRs associated with `M~1`.
///
/// `associated` lists the PRs GitHub associates with the commit right before
/// the merge commit `M`. If `pr_number` is among them, `M` is the last of the
/// PR's own commits replayed onto the base: a rebase merge. Otherwise `M` is a
/// single synthetic commit: a squash merge.
///
/// The result depends only on membership, never on the order of `associated`.
pub fn classify_from_associated(pr_number: u64, associated: &[u64]) -> MergeStrategy {
    if associated.contains(&pr_number) {
        MergeStrategy::Rebase
    } else {
        MergeStrategy::Squash
    }
}
