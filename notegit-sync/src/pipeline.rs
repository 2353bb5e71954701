//! Sync orchestrator: one full clean → bootstrap → fetch → export → commit →
//! push pass.
//!
//! Stage failure handling is deliberately asymmetric:
//! - the pre-run settings guard skips the whole run with one notification;
//! - reconciler and bootstrap failures are reported and the run continues
//!   degraded (note export should survive a transient repo hiccup);
//! - fetch, export, commit, and push failures abort the remaining stages.
//!
//! There is no retry state; every run starts from freshly loaded settings
//! and the next scheduled tick is the only recovery mechanism.

use std::time::Instant;

use notegit_core::{NoteTree, Settings};
use notegit_store::NoteStore;

use crate::bootstrap::{ensure_repository, BootstrapOutcome};
use crate::clean::clean_directory;
use crate::error::SyncError;
use crate::export::{export_tree, ExportReport};
use crate::git::Git;
use crate::notify::Notifier;
use crate::stages::{commit_changes, push_changes, CommitOutcome, PushOutcome};

/// Result of one orchestration pass.
#[derive(Debug)]
pub enum RunOutcome {
    /// The pre-run guard failed; nothing was touched.
    Skipped { reason: String },
    /// All stages ran (possibly degraded).
    Completed(RunReport),
}

/// What one completed pass did.
#[derive(Debug)]
pub struct RunReport {
    pub bootstrap: BootstrapOutcome,
    pub export: ExportReport,
    pub commit: CommitOutcome,
    pub push: PushOutcome,
    /// Non-fatal stage problems the run survived.
    pub degraded: Vec<String>,
    pub duration_ms: u128,
}

/// Run the export-then-sync pipeline once.
///
/// This is the canonical entrypoint for both `notegit run` and the daemon
/// scheduler.
pub fn run_once(
    settings: &Settings,
    store: &dyn NoteStore,
    notifier: &dyn Notifier,
) -> Result<RunOutcome, SyncError> {
    // Guard: no filesystem or subprocess work with an incomplete config.
    if let Err(err) = settings.validate() {
        let reason = format!("Sync skipped, please complete the settings: {err}");
        notifier.notify(&reason);
        return Ok(RunOutcome::Skipped { reason });
    }

    let started = Instant::now();
    let mut degraded = Vec::new();
    let git = Git::new(&settings.git_path, &settings.local_path);

    // Reconcile: stale exports must not survive into the commit.
    if let Err(err) = clean_directory(&settings.local_path) {
        let message = format!("Error clearing the export directory: {err}");
        tracing::error!("{message}");
        notifier.notify(&message);
        degraded.push(message);
    }

    let bootstrap = match ensure_repository(&git, settings.repo_url.as_deref(), &settings.branch) {
        Ok(outcome) => {
            if let BootstrapOutcome::Degraded { reason } = &outcome {
                notifier.notify(&format!("Repository setup failed: {reason}"));
                degraded.push(reason.clone());
            }
            outcome
        }
        Err(err) => {
            notifier.notify(&format!("Cannot run git: {err}"));
            return Err(err.into());
        }
    };

    let tree = match fetch_tree(store) {
        Ok(tree) => tree,
        Err(err) => {
            notifier.notify(&format!("Error fetching notes: {err}"));
            return Err(err);
        }
    };

    let export = match export_tree(&settings.local_path, &tree) {
        Ok(report) => report,
        Err(err) => {
            notifier.notify(&format!("Error exporting notes: {err}"));
            return Err(err);
        }
    };

    let commit = match commit_changes(&git, &settings.branch) {
        Ok(outcome) => outcome,
        Err(err) => {
            notifier.notify(&format!("Error during commit: {err}"));
            return Err(err.into());
        }
    };

    let push = match push_changes(&git, &settings.branch, settings.repo_url.as_deref()) {
        Ok(outcome) => outcome,
        Err(err) => {
            notifier.notify(&format!("Error during push: {err}"));
            return Err(err.into());
        }
    };

    let report = RunReport {
        bootstrap,
        export,
        commit,
        push,
        degraded,
        duration_ms: started.elapsed().as_millis(),
    };
    tracing::info!(
        notes = report.export.notes_written,
        orphaned = report.export.orphaned_notes,
        committed = matches!(report.commit, CommitOutcome::Committed { .. }),
        pushed = matches!(report.push, PushOutcome::Pushed),
        duration_ms = report.duration_ms,
        "sync run completed"
    );
    Ok(RunOutcome::Completed(report))
}

fn fetch_tree(store: &dyn NoteStore) -> Result<NoteTree, SyncError> {
    let notebooks = store.list_notebooks()?;
    let notes = store.list_notes()?;
    Ok(NoteTree::build(notebooks, notes))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use notegit_core::{Note, Notebook};
    use notegit_store::StoreError;

    use super::*;
    use crate::notify::testing::RecordingNotifier;

    /// Counts every listing call; panics are not needed — the guard tests
    /// assert the counter stays at zero.
    #[derive(Default)]
    struct CountingStore {
        calls: AtomicUsize,
    }

    impl CountingStore {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl NoteStore for CountingStore {
        fn list_notebooks(&self) -> Result<Vec<Notebook>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }

        fn list_notes(&self) -> Result<Vec<Note>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    #[test]
    fn missing_branch_skips_with_one_notification_and_no_side_effects() {
        let store = CountingStore::default();
        let notifier = RecordingNotifier::default();
        let settings = Settings {
            local_path: PathBuf::from("/tmp/never-created-by-this-test"),
            ..Settings::default()
        };

        let outcome = run_once(&settings, &store, &notifier).expect("run");

        assert!(matches!(outcome, RunOutcome::Skipped { .. }));
        assert_eq!(notifier.messages().len(), 1);
        assert_eq!(store.calls(), 0);
        assert!(!PathBuf::from("/tmp/never-created-by-this-test").exists());
    }

    #[test]
    fn missing_local_path_also_skips() {
        let store = CountingStore::default();
        let notifier = RecordingNotifier::default();
        let settings = Settings {
            branch: "main".to_string(),
            ..Settings::default()
        };

        let outcome = run_once(&settings, &store, &notifier).expect("run");

        assert!(matches!(outcome, RunOutcome::Skipped { .. }));
        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn missing_git_executable_aborts_before_fetching() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let store = CountingStore::default();
        let notifier = RecordingNotifier::default();
        let settings = Settings {
            branch: "main".to_string(),
            local_path: dir.path().to_path_buf(),
            git_path: PathBuf::from("/nonexistent/notegit-fake-git"),
            ..Settings::default()
        };

        let err = run_once(&settings, &store, &notifier).expect_err("should abort");
        assert!(matches!(err, SyncError::Git(_)));
        assert_eq!(store.calls(), 0, "fetch must not run after a fatal bootstrap");
        assert_eq!(notifier.messages().len(), 1);
    }
}
