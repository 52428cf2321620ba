//! Cherry-pick engine for merged PRs
//!
//! Three phases:
//! 1. Gather - PR metadata and working copy state (effectful, read-only)
//! 2. Plan - classify the merge and pick a `Reconstruction` (pure)
//! 3. Execute - create the branch, reconstruct, push (effectful)
//!
//! `workflow` sequences all three as a forward-only state machine.

mod branch;
mod classify;
mod execute;
mod plan;
mod progress;
mod workflow;

pub use branch::{BRANCH_PREFIX, branch_name, validate_onto};
pub use classify::classify_from_associated;
pub use execute::reconstruct;
pub use plan::{Reconstruction, plan_reconstruction};
pub use progress::{NoopProgress, ProgressCallback};
pub use workflow::{CherryPickOutcome, CherryPickRequest, Stage, run_cherry_pick};
