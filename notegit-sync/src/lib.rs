//! # notegit-sync
//!
//! The export-then-sync pipeline: clean the export directory, bootstrap the
//! git repository, fetch the note collection, materialize it as a file tree,
//! commit, push.
//!
//! Call [`pipeline::run_once`] for one full pass; the daemon and CLI are thin
//! drivers around it.

pub mod bootstrap;
pub mod clean;
pub mod error;
pub mod export;
pub mod git;
pub mod notify;
pub mod pipeline;
pub mod stages;

pub use bootstrap::BootstrapOutcome;
pub use error::{GitError, SyncError};
pub use export::ExportReport;
pub use git::Git;
pub use notify::{LogNotifier, Notifier};
pub use pipeline::{run_once, RunOutcome, RunReport};
pub use stages::{CommitOutcome, PushOutcome};
