//! Auth command - show and verify GitHub credentials

use crate::cli::style::{Stylize, check};
use crate::cli::{CommandError, RepoOptions};
use anstream::println;
use gh_cherry_pick::auth::{get_github_auth, test_github_auth};

/// Run the auth command
pub async fn run_auth(options: &RepoOptions) -> Result<(), CommandError> {
    let auth = get_github_auth(options.token.as_deref(), options.host.as_deref()).await?;
    println!("Token source: {}", auth.source.accent());

    let login = test_github_auth(&auth).await?;
    println!("{} Authenticated as {}", check(), login.accent());

    Ok(())
}
