//! Cherry-pick workflow - forward-only state machine
//!
//! Each state is a precondition gate for the next. A failed transition ends
//! the run with a `StageError` naming the stage that could not be reached;
//! nothing is retried and nothing already done is undone.

use crate::cherry_pick::branch::branch_name;
use crate::cherry_pick::execute::reconstruct;
use crate::cherry_pick::plan::{Reconstruction, plan_reconstruction};
use crate::cherry_pick::progress::ProgressCallback;
use crate::error::{Error, Result, StageError};
use crate::platform::PlatformService;
use crate::repo::WorkingCopy;
use crate::types::{MergeStrategy, PullRequest};
use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Workflow stages, in the only order they can be reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Nothing checked yet
    Start,
    /// Working copy has no uncommitted changes
    PreflightClean,
    /// No rebase or `git am` in progress
    PreflightNotMidRebase,
    /// PR metadata fetched
    PrFetched,
    /// PR confirmed merged
    PrVerifiedMerged,
    /// Target branch fetched from the remote
    TargetFetched,
    /// Reconstruction branch created and checked out
    BranchCreated,
    /// Merge strategy classified
    StrategyDetermined,
    /// PR changes reproduced on the branch
    Reconstructed,
    /// Branch pushed to the remote
    Pushed,
    /// Finished
    Done,
}

impl Stage {
    /// Every stage, in order
    pub const ALL: [Self; 11] = [
        Self::Start,
        Self::PreflightClean,
        Self::PreflightNotMidRebase,
        Self::PrFetched,
        Self::PrVerifiedMerged,
        Self::TargetFetched,
        Self::BranchCreated,
        Self::StrategyDetermined,
        Self::Reconstructed,
        Self::Pushed,
        Self::Done,
    ];

    /// The stage after this one (`Done` is terminal)
    pub const fn next(self) -> Self {
        match self {
            Self::Start => Self::PreflightClean,
            Self::PreflightClean => Self::PreflightNotMidRebase,
            Self::PreflightNotMidRebase => Self::PrFetched,
            Self::PrFetched => Self::PrVerifiedMerged,
            Self::PrVerifiedMerged => Self::TargetFetched,
            Self::TargetFetched => Self::BranchCreated,
            Self::BranchCreated => Self::StrategyDetermined,
            Self::StrategyDetermined => Self::Reconstructed,
            Self::Reconstructed => Self::Pushed,
            Self::Pushed | Self::Done => Self::Done,
        }
    }

    /// Whether reaching this stage changes the working copy or the remote
    pub const fn is_mutating(self) -> bool {
        matches!(
            self,
            Self::TargetFetched | Self::BranchCreated | Self::Reconstructed | Self::Pushed
        )
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::PreflightClean => "check working copy is clean",
            Self::PreflightNotMidRebase => "check no rebase/am in progress",
            Self::PrFetched => "fetch pull request",
            Self::PrVerifiedMerged => "verify pull request is merged",
            Self::TargetFetched => "fetch target branch",
            Self::BranchCreated => "create branch",
            Self::StrategyDetermined => "detect merge strategy",
            Self::Reconstructed => "reconstruct changes",
            Self::Pushed => "push branch",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Inputs for one cherry-pick run, fixed for its whole duration
#[derive(Debug, Clone)]
pub struct CherryPickRequest {
    /// PR to cherry-pick
    pub pr_number: u64,
    /// Branch to reproduce the PR onto
    pub onto: String,
    /// Remote to fetch from and push to
    pub remote: String,
    /// Timestamp baked into the branch name
    pub created_at: DateTime<Utc>,
}

impl CherryPickRequest {
    /// Request against `origin`, timestamped now
    pub fn new(pr_number: u64, onto: impl Into<String>) -> Self {
        Self {
            pr_number,
            onto: onto.into(),
            remote: "origin".to_string(),
            created_at: Utc::now(),
        }
    }

    /// Name of the branch this run creates
    pub fn branch_name(&self) -> String {
        branch_name(self.pr_number, &self.onto, self.created_at)
    }

    /// Remote-tracking ref the new branch starts from
    pub fn start_point(&self) -> String {
        format!("{}/{}", self.remote, self.onto)
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct CherryPickOutcome {
    /// The pushed branch
    pub branch: String,
    /// How the PR had been merged
    pub strategy: MergeStrategy,
    /// The PR as fetched at the start of the run
    pub pr: PullRequest,
}

/// Workflow state, carrying what earlier stages established
#[derive(Debug)]
enum State {
    Start,
    PreflightClean,
    PreflightNotMidRebase,
    PrFetched(PullRequest),
    PrVerifiedMerged(PullRequest),
    TargetFetched(PullRequest),
    BranchCreated {
        pr: PullRequest,
        branch: String,
    },
    StrategyDetermined {
        pr: PullRequest,
        branch: String,
        reconstruction: Reconstruction,
    },
    Reconstructed {
        pr: PullRequest,
        branch: String,
        strategy: MergeStrategy,
    },
    Pushed(CherryPickOutcome),
    Done(CherryPickOutcome),
}

impl State {
    const fn stage(&self) -> Stage {
        match self {
            Self::Start => Stage::Start,
            Self::PreflightClean => Stage::PreflightClean,
            Self::PreflightNotMidRebase => Stage::PreflightNotMidRebase,
            Self::PrFetched(_) => Stage::PrFetched,
            Self::PrVerifiedMerged(_) => Stage::PrVerifiedMerged,
            Self::TargetFetched(_) => Stage::TargetFetched,
            Self::BranchCreated { .. } => Stage::BranchCreated,
            Self::StrategyDetermined { .. } => Stage::StrategyDetermined,
            Self::Reconstructed { .. } => Stage::Reconstructed,
            Self::Pushed(_) => Stage::Pushed,
            Self::Done(_) => Stage::Done,
        }
    }
}

struct Workflow<'a> {
    request: &'a CherryPickRequest,
    platform: &'a dyn PlatformService,
    repo: &'a dyn WorkingCopy,
    progress: &'a dyn ProgressCallback,
}

impl Workflow<'_> {
    /// Perform the single transition out of `state`
    async fn advance(&self, state: State) -> Result<State> {
        let request = self.request;

        match state {
            State::Start => {
                if self.repo.is_dirty().await? {
                    return Err(Error::Preflight("repository is dirty".to_string()));
                }
                Ok(State::PreflightClean)
            }
            State::PreflightClean => {
                if self.repo.is_in_rebase_or_am().await? {
                    return Err(Error::Preflight("repository is mid-rebase/am".to_string()));
                }
                Ok(State::PreflightNotMidRebase)
            }
            State::PreflightNotMidRebase => {
                let pr = self.platform.get_pull_request(request.pr_number).await?;
                Ok(State::PrFetched(pr))
            }
            State::PrFetched(pr) => {
                if !pr.merged {
                    return Err(Error::Unmerged {
                        number: pr.number,
                        state: pr.status_label().to_string(),
                    });
                }
                Ok(State::PrVerifiedMerged(pr))
            }
            State::PrVerifiedMerged(pr) => {
                self.repo.fetch(&request.remote, &request.onto).await?;
                Ok(State::TargetFetched(pr))
            }
            State::TargetFetched(pr) => {
                let branch = request.branch_name();
                self.repo
                    .create_branch(&branch, &request.start_point())
                    .await?;
                Ok(State::BranchCreated { pr, branch })
            }
            State::BranchCreated { pr, branch } => {
                let strategy = self.platform.merge_strategy_for(&pr).await?;
                let reconstruction = plan_reconstruction(&pr, strategy)?;
                self.progress
                    .on_message(&format!("{strategy} merge detected: {reconstruction}"))
                    .await;
                Ok(State::StrategyDetermined {
                    pr,
                    branch,
                    reconstruction,
                })
            }
            State::StrategyDetermined {
                pr,
                branch,
                reconstruction,
            } => {
                reconstruct(&reconstruction, self.platform, self.repo).await?;
                Ok(State::Reconstructed {
                    pr,
                    branch,
                    strategy: reconstruction.strategy(),
                })
            }
            State::Reconstructed {
                pr,
                branch,
                strategy,
            } => {
                self.repo.push_branch(&request.remote, &branch).await?;
                Ok(State::Pushed(CherryPickOutcome {
                    branch,
                    strategy,
                    pr,
                }))
            }
            State::Pushed(outcome) => Ok(State::Done(outcome)),
            State::Done(_) => Err(Error::Internal("workflow advanced past done".to_string())),
        }
    }
}

/// Run the cherry-pick workflow to completion or first failure
///
/// On success returns the pushed branch. On failure the working copy is left
/// as the failing step left it; a branch that was already created stays
/// checked out for inspection.
pub async fn run_cherry_pick(
    request: &CherryPickRequest,
    platform: &dyn PlatformService,
    repo: &dyn WorkingCopy,
    progress: &dyn ProgressCallback,
) -> std::result::Result<CherryPickOutcome, StageError> {
    let workflow = Workflow {
        request,
        platform,
        repo,
        progress,
    };

    info!(
        pr_number = request.pr_number,
        onto = %request.onto,
        remote = %request.remote,
        "starting cherry-pick"
    );

    let mut state = State::Start;
    loop {
        if let State::Done(outcome) = state {
            info!(branch = %outcome.branch, strategy = %outcome.strategy, "cherry-pick complete");
            return Ok(outcome);
        }

        let target = state.stage().next();
        progress.on_stage_start(target).await;

        match workflow.advance(state).await {
            Ok(next) => {
                info!(stage = %target, "stage reached");
                progress.on_stage_complete(target).await;
                state = next;
            }
            Err(source) => {
                error!(
                    stage = %target,
                    mutating = target.is_mutating(),
                    error = %source,
                    "cherry-pick aborted"
                );
                progress.on_stage_failed(target, &source).await;
                return Err(StageError {
                    stage: target,
                    source,
                });
            }
        }
    }
}
