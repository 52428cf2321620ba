//! CLI command implementations

mod auth;
mod context;
mod diff;
mod inspect;
mod pick;
pub mod style;

pub use auth::run_auth;
pub use context::{CommandContext, RepoOptions};
pub use diff::run_diff;
pub use inspect::run_inspect;
pub use pick::run_pick;

use anstream::println;
use async_trait::async_trait;
use gh_cherry_pick::cherry_pick::{ProgressCallback, Stage};
use gh_cherry_pick::error::{Error, StageError};
use indicatif::ProgressBar;
use std::sync::Mutex;
use std::time::Duration;
use style::{Stylize, check, cross, spinner_style};

/// A failed command: what to print and which exit code to use
#[derive(Debug)]
pub struct CommandError {
    /// Failure message
    pub message: String,
    /// Process exit code
    pub code: u8,
    /// Machine-readable kind
    pub kind: &'static str,
}

impl From<Error> for CommandError {
    fn from(err: Error) -> Self {
        Self {
            message: err.to_string(),
            code: err.exit_code(),
            kind: err.kind(),
        }
    }
}

impl From<StageError> for CommandError {
    fn from(err: StageError) -> Self {
        Self {
            message: err.to_string(),
            code: err.exit_code(),
            kind: err.source.kind(),
        }
    }
}

/// Stages that only check state get no spinner; these talk to the network
/// or rewrite the working copy
const fn shows_spinner(stage: Stage) -> bool {
    matches!(
        stage,
        Stage::PrFetched
            | Stage::TargetFetched
            | Stage::StrategyDetermined
            | Stage::Reconstructed
            | Stage::Pushed
    )
}

/// Progress callback that renders stages to the terminal
pub struct CliProgress {
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    /// One line per stage, spinner while network/git work runs
    pub const fn compact() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn take_spinner(&self) -> Option<ProgressBar> {
        self.spinner.lock().ok().and_then(|mut s| s.take())
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_stage_start(&self, stage: Stage) {
        if !shows_spinner(stage) {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.set_message(format!("{stage}..."));
        spinner.enable_steady_tick(Duration::from_millis(80));
        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(spinner);
        }
    }

    async fn on_stage_complete(&self, stage: Stage) {
        if stage == Stage::Done {
            return;
        }
        let line = format!("{} {}", check(), stage.to_string().muted());
        match self.take_spinner() {
            Some(spinner) => spinner.finish_with_message(line),
            None => println!("{line}"),
        }
    }

    async fn on_stage_failed(&self, stage: Stage, _error: &Error) {
        let line = format!("{} {}", cross(), stage.to_string().warn());
        match self.take_spinner() {
            Some(spinner) => spinner.finish_with_message(line),
            None => println!("{line}"),
        }
    }

    async fn on_message(&self, message: &str) {
        let spinner = self.spinner.lock().ok().and_then(|s| s.as_ref().cloned());
        match spinner {
            Some(spinner) => spinner.println(format!("  {}", message.accent())),
            None => println!("  {}", message.accent()),
        }
    }
}
