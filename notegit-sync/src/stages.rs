//! Commit and push stages.
//!
//! Both stages propagate hard failures — a failed commit aborts the push, a
//! failed push aborts the run. The next scheduled tick is the only retry
//! mechanism.

use chrono::{DateTime, Local};

use crate::error::GitError;
use crate::git::Git;

/// Commit message timestamp format, local time.
const COMMIT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// How the commit stage ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed { message: String },
    NothingToCommit,
}

/// How the push stage ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed,
    /// No remote URL configured and no `origin` registered; nothing to push
    /// to, skipped with a log line.
    NoRemoteConfigured,
}

/// Checkout the branch (creating it if needed), stage everything, and commit
/// unless the working copy is clean.
pub fn commit_changes(git: &Git, branch: &str) -> Result<CommitOutcome, GitError> {
    commit_changes_at(git, branch, Local::now())
}

fn commit_changes_at(
    git: &Git,
    branch: &str,
    now: DateTime<Local>,
) -> Result<CommitOutcome, GitError> {
    git.checkout_or_create(branch)?;
    git.add_all()?;

    let status = git.status_porcelain()?;
    if status.is_empty() {
        tracing::info!(%branch, "nothing to commit");
        return Ok(CommitOutcome::NothingToCommit);
    }

    let message = format!("Exported on {}", now.format(COMMIT_TIMESTAMP_FORMAT));
    git.commit(&message)?;
    tracing::info!(%branch, %message, "committed working-copy changes");
    Ok(CommitOutcome::Committed { message })
}

/// Register `origin` if absent, then force-push the branch and set it as
/// upstream.
pub fn push_changes(
    git: &Git,
    branch: &str,
    repo_url: Option<&str>,
) -> Result<PushOutcome, GitError> {
    let remotes = git.remotes()?;
    let has_origin = remotes.lines().any(|line| {
        line.split_whitespace()
            .next()
            .is_some_and(|name| name == "origin")
    });

    if !has_origin {
        match repo_url.filter(|url| !url.is_empty()) {
            Some(url) => {
                git.remote_add_origin(url)?;
                tracing::info!(%url, "registered origin remote");
            }
            None => {
                tracing::info!("no remote configured; skipping push");
                return Ok(PushOutcome::NoRemoteConfigured);
            }
        }
    }

    git.push_force(branch)?;
    tracing::info!(%branch, "pushed to origin");
    Ok(PushOutcome::Pushed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // The subprocess-level behavior of these stages is covered by the
    // stub-git integration tests in `tests/git_stages.rs`; here only the
    // pure pieces are checked.

    #[test]
    fn commit_message_timestamp_format() {
        let now = Local::now();
        let formatted = now.format(COMMIT_TIMESTAMP_FORMAT).to_string();
        // yyyy-MM-dd_HH-mm-ss
        assert_eq!(formatted.len(), 19);
        assert_eq!(&formatted[4..5], "-");
        assert_eq!(&formatted[10..11], "_");
        assert_eq!(&formatted[13..14], "-");
    }

    #[test]
    fn origin_detection_ignores_other_remotes() {
        let lines = "upstream\tgit@host:a.git (fetch)\nupstream\tgit@host:a.git (push)";
        let has_origin = lines.lines().any(|line| {
            line.split_whitespace()
                .next()
                .is_some_and(|name| name == "origin")
        });
        assert!(!has_origin);
    }
}
