//! Progress reporting for the cherry-pick workflow

use crate::cherry_pick::Stage;
use crate::error::Error;
use async_trait::async_trait;

/// Receives workflow progress; the CLI renders it, tests ignore it
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// The workflow is about to enter `stage`
    async fn on_stage_start(&self, stage: Stage);

    /// `stage` was reached
    async fn on_stage_complete(&self, stage: Stage);

    /// Entering `stage` failed; the run stops here
    async fn on_stage_failed(&self, stage: Stage, error: &Error);

    /// Free-form status message
    async fn on_message(&self, message: &str);
}

/// Progress callback that discards everything
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_stage_start(&self, _stage: Stage) {}
    async fn on_stage_complete(&self, _stage: Stage) {}
    async fn on_stage_failed(&self, _stage: Stage, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
