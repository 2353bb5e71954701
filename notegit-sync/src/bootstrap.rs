//! Repository bootstrapper.
//!
//! Ensures the export directory is a working git repository. A no-op when
//! `.git` already exists; otherwise a plain `init` when no remote is
//! configured, or a clone + branch checkout + pull when one is.
//!
//! Setup failures do not abort the run: note export should not be blocked by
//! a transient clone hiccup. The outcome type makes the orchestrator's
//! continue-vs-abort decision an explicit branch — only a missing git
//! executable is fatal.

use std::path::Path;
use std::time::Duration;

use crate::error::GitError;
use crate::git::Git;

/// Pause after `clone` before operating on the fresh repository.
const CLONE_SETTLE_DELAY: Duration = Duration::from_secs(10);

/// How repository setup ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// `.git` was already present; nothing done.
    AlreadyInitialized,
    /// Fresh local repository, no remote configured.
    Initialized,
    /// Cloned from the configured remote and switched to the branch.
    Cloned,
    /// Setup failed but the run continues against the directory as-is.
    Degraded { reason: String },
}

impl BootstrapOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, BootstrapOutcome::Degraded { .. })
    }
}

/// Idempotent repository setup. See module docs for the outcome semantics.
pub fn ensure_repository(
    git: &Git,
    repo_url: Option<&str>,
    branch: &str,
) -> Result<BootstrapOutcome, GitError> {
    ensure_repository_with_delay(git, repo_url, branch, CLONE_SETTLE_DELAY)
}

fn ensure_repository_with_delay(
    git: &Git,
    repo_url: Option<&str>,
    branch: &str,
    settle: Duration,
) -> Result<BootstrapOutcome, GitError> {
    if has_repository(git.workdir()) {
        return Ok(BootstrapOutcome::AlreadyInitialized);
    }
    tracing::info!(dir = %git.workdir().display(), "no git metadata found, bootstrapping");

    let result = match repo_url.filter(|url| !url.is_empty()) {
        None => git.init().map(|()| BootstrapOutcome::Initialized),
        Some(url) => clone_and_checkout(git, url, branch, settle),
    };

    match result {
        Ok(outcome) => Ok(outcome),
        // Nothing can work without the executable; let the run abort.
        Err(err @ GitError::ExecutableNotFound { .. }) => Err(err),
        Err(err) => {
            tracing::error!(error = %err, "repository bootstrap failed, continuing degraded");
            Ok(BootstrapOutcome::Degraded {
                reason: err.to_string(),
            })
        }
    }
}

fn clone_and_checkout(
    git: &Git,
    url: &str,
    branch: &str,
    settle: Duration,
) -> Result<BootstrapOutcome, GitError> {
    git.clone_into(url)?;
    // Let the clone finish registering before touching the fresh repository.
    std::thread::sleep(settle);
    git.checkout_new(branch)?;
    // Reconcile with any history the remote already has for this branch.
    if let Err(err) = git.pull_origin(branch) {
        tracing::warn!(error = %err, %branch, "pull after clone failed (branch may be new on the remote)");
    }
    Ok(BootstrapOutcome::Cloned)
}

fn has_repository(dir: &Path) -> bool {
    dir.join(".git").exists()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn existing_metadata_short_circuits_without_running_git() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::create_dir_all(dir.path().join(".git")).expect("mkdir");

        // The executable path is bogus; the stage must not touch it.
        let git = Git::new("/nonexistent/notegit-fake-git", dir.path());
        let outcome = ensure_repository(&git, Some("git@host:r.git"), "main").expect("bootstrap");
        assert_eq!(outcome, BootstrapOutcome::AlreadyInitialized);
    }

    #[test]
    fn missing_executable_is_fatal() {
        let dir = TempDir::new().expect("tempdir");
        let git = Git::new("/nonexistent/notegit-fake-git", dir.path());
        let err = ensure_repository_with_delay(&git, None, "main", Duration::ZERO)
            .expect_err("should be fatal");
        assert!(matches!(err, GitError::ExecutableNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn tool_failure_degrades_instead_of_aborting() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().expect("tempdir");
        let stub = dir.path().join("failing-git");
        std::fs::write(&stub, "#!/bin/sh\necho 'fatal: network down' >&2\nexit 1\n")
            .expect("write");
        std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o755)).expect("chmod");

        let git = Git::new(&stub, dir.path());
        let outcome = ensure_repository_with_delay(
            &git,
            Some("git@host:r.git"),
            "main",
            Duration::ZERO,
        )
        .expect("degraded, not fatal");
        match outcome {
            BootstrapOutcome::Degraded { reason } => assert!(reason.contains("network down")),
            other => panic!("expected Degraded, got {other:?}"),
        }
    }

    /// Logging stub: records every argv to `calls.log`; an optional extra
    /// case line lets a single subcommand fail.
    #[cfg(unix)]
    fn install_logging_git(dir: &std::path::Path, failing_subcommand: Option<&str>) -> (std::path::PathBuf, std::path::PathBuf) {
        use std::os::unix::fs::PermissionsExt;

        let log = dir.join("calls.log");
        let stub = dir.join("logging-git");
        let fail_case = match failing_subcommand {
            Some(sub) => format!("case \"$1\" in\n  {sub}) echo 'fatal: refused' >&2; exit 1 ;;\nesac\n"),
            None => String::new(),
        };
        std::fs::write(
            &stub,
            format!(
                "#!/bin/sh\necho \"$@\" >> '{}'\n{fail_case}exit 0\n",
                log.display()
            ),
        )
        .expect("write");
        std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o755)).expect("chmod");
        (stub, log)
    }

    #[cfg(unix)]
    fn logged_calls(log: &std::path::Path) -> Vec<String> {
        std::fs::read_to_string(log)
            .expect("read log")
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[cfg(unix)]
    #[test]
    fn empty_remote_url_means_plain_init() {
        let dir = TempDir::new().expect("tempdir");
        let (stub, log) = install_logging_git(dir.path(), None);

        let workdir = dir.path().join("export");
        std::fs::create_dir_all(&workdir).expect("mkdir");
        let git = Git::new(&stub, &workdir);

        let outcome = ensure_repository_with_delay(&git, Some(""), "main", Duration::ZERO)
            .expect("bootstrap");
        assert_eq!(outcome, BootstrapOutcome::Initialized);
        assert_eq!(logged_calls(&log), ["init"]);
    }

    #[cfg(unix)]
    #[test]
    fn clone_path_runs_clone_checkout_pull_in_order() {
        let dir = TempDir::new().expect("tempdir");
        let (stub, log) = install_logging_git(dir.path(), None);

        let workdir = dir.path().join("export");
        std::fs::create_dir_all(&workdir).expect("mkdir");
        let git = Git::new(&stub, &workdir);

        let outcome = ensure_repository_with_delay(
            &git,
            Some("git@host:user/notes.git"),
            "main",
            Duration::ZERO,
        )
        .expect("bootstrap");

        assert_eq!(outcome, BootstrapOutcome::Cloned);
        let calls = logged_calls(&log);
        assert_eq!(calls.len(), 3, "unexpected calls: {calls:?}");
        assert_eq!(
            calls[0],
            format!("clone git@host:user/notes.git {}", workdir.display())
        );
        assert_eq!(calls[1], "checkout -b main");
        assert_eq!(calls[2], "pull origin main");
    }

    #[cfg(unix)]
    #[test]
    fn failed_pull_after_clone_still_counts_as_cloned() {
        let dir = TempDir::new().expect("tempdir");
        let (stub, log) = install_logging_git(dir.path(), Some("pull"));

        let workdir = dir.path().join("export");
        std::fs::create_dir_all(&workdir).expect("mkdir");
        let git = Git::new(&stub, &workdir);

        let outcome = ensure_repository_with_delay(
            &git,
            Some("git@host:user/notes.git"),
            "main",
            Duration::ZERO,
        )
        .expect("bootstrap");

        // The branch may simply not exist on the remote yet; the forced push
        // creates it later.
        assert_eq!(outcome, BootstrapOutcome::Cloned);
        let calls = logged_calls(&log);
        assert_eq!(calls[2], "pull origin main");
    }
}
