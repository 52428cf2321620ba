//! Error types for gh-cherry-pick

use crate::cherry_pick::Stage;
use thiserror::Error;

/// Errors that can occur while cherry-picking a pull request
#[derive(Error, Debug)]
pub enum Error {
    /// Working copy is not in a state the workflow can start from
    #[error("preflight check failed: {0}")]
    Preflight(String),

    /// Pull request does not exist in the configured repository
    #[error("pull request #{0} not found")]
    NotFound(u64),

    /// Pull request has not been merged yet
    #[error("pull request #{number} is not merged (state: {state})")]
    Unmerged {
        /// PR number
        number: u64,
        /// Human-readable current state (draft, open, closed)
        state: String,
    },

    /// `git fetch` failed
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Branch creation / checkout failed
    #[error("checkout failed: {0}")]
    Checkout(String),

    /// `git am -3` could not apply the patch series
    #[error("patch did not apply: {0}")]
    PatchApply(String),

    /// `git cherry-pick` stopped on a conflict
    #[error("cherry-pick failed: {0}")]
    CherryPick(String),

    /// `git push` was rejected
    #[error("push failed: {0}")]
    Push(String),

    /// A read-only git query failed
    #[error("git error: {0}")]
    Git(String),

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// No usable credentials
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Invalid invocation or repository configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Remote is not configured in the working copy
    #[error("remote '{0}' not found")]
    RemoteNotFound(String),

    /// Could not parse a remote URL into owner/repo
    #[error("invalid remote URL: {0}")]
    InvalidRemoteUrl(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (unexpected state)
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

impl Error {
    /// Process exit code for this kind of failure.
    ///
    /// Codes are stable so scripts can tell a conflict from a dirty checkout
    /// without parsing the message.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Preflight(_) => 10,
            Self::NotFound(_) => 11,
            Self::Unmerged { .. } => 12,
            Self::Fetch(_) => 20,
            Self::Checkout(_) => 21,
            Self::Push(_) => 22,
            Self::PatchApply(_) => 30,
            Self::CherryPick(_) => 31,
            Self::GitHubApi(_) => 40,
            Self::Auth(_) => 41,
            Self::Config(_) | Self::RemoteNotFound(_) | Self::InvalidRemoteUrl(_) => 2,
            Self::Git(_) | Self::Io(_) | Self::Internal(_) => 1,
        }
    }

    /// Short machine-readable name for this kind of failure
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Preflight(_) => "preflight",
            Self::NotFound(_) => "not-found",
            Self::Unmerged { .. } => "unmerged",
            Self::Fetch(_) => "fetch",
            Self::Checkout(_) => "checkout",
            Self::Push(_) => "push",
            Self::PatchApply(_) => "patch-apply",
            Self::CherryPick(_) => "cherry-pick",
            Self::GitHubApi(_) => "github-api",
            Self::Auth(_) => "auth",
            Self::Config(_) | Self::RemoteNotFound(_) | Self::InvalidRemoteUrl(_) => "config",
            Self::Git(_) => "git",
            Self::Io(_) => "io",
            Self::Internal(_) => "internal",
        }
    }
}

/// A workflow failure, tagged with the stage that was being entered
#[derive(Error, Debug)]
#[error("{stage}: {source}")]
pub struct StageError {
    /// Stage the workflow failed to reach
    pub stage: Stage,
    /// Underlying cause
    #[source]
    pub source: Error,
}

impl StageError {
    /// Process exit code, taken from the underlying error
    pub const fn exit_code(&self) -> u8 {
        self.source.exit_code()
    }
}

/// Result type alias for gh-cherry-pick operations
pub type Result<T> = std::result::Result<T, Error>;
