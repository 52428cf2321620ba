//! Reconstruction branch naming

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};

/// Prefix shared by every branch this tool creates
pub const BRANCH_PREFIX: &str = "cherry-pick-pr-";

/// Derive the branch name for cherry-picking `pr_number` onto `onto`.
///
/// `<prefix><pr>-onto-<onto>-<unix seconds>`. The PR number and timestamp are
/// digits only, so distinct inputs never produce the same name.
pub fn branch_name(pr_number: u64, onto: &str, created_at: DateTime<Utc>) -> String {
    format!(
        "{BRANCH_PREFIX}{pr_number}-onto-{onto}-{}",
        created_at.timestamp()
    )
}

/// Reject target branch names git would refuse inside a ref name
///
/// Follows `git check-ref-format --branch`: no empty or dot-leading path
/// components, no component ending in `.lock`, no trailing dot, no bare `@`.
pub fn validate_onto(onto: &str) -> Result<()> {
    const FORBIDDEN: [char; 7] = ['~', '^', ':', '?', '*', '[', '\\'];

    let bad_component = onto
        .split('/')
        .any(|c| c.is_empty() || c.starts_with('.') || c.ends_with(".lock"));

    let invalid = onto.is_empty()
        || onto == "@"
        || onto.starts_with('-')
        || onto.ends_with('.')
        || bad_component
        || onto.contains("..")
        || onto.contains("@{")
        || onto
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || FORBIDDEN.contains(&c));

    if invalid {
        return Err(Error::Config(format!("invalid target branch name '{onto}'")));
    }
    Ok(())
}
