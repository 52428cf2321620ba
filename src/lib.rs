//! gh-cherry-pick - reproduce merged GitHub PRs on another branch
//!
//! Detects whether a PR was squash- or rebase-merged and rebuilds it on a
//! fresh branch off the target: squash merges are cherry-picked as one
//! commit, rebase merges are re-applied from the PR's patch series.

pub mod auth;
pub mod cherry_pick;
pub mod error;
pub mod platform;
pub mod repo;
pub mod types;
