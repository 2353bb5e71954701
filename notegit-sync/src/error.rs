//! Error types for notegit-sync.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use notegit_store::StoreError;

/// Errors from invoking the external git tool.
#[derive(Debug, Error)]
pub enum GitError {
    /// The configured executable path does not resolve to a runnable binary.
    /// Nothing downstream can work; the run aborts.
    #[error("git executable not found at {path}")]
    ExecutableNotFound { path: PathBuf },

    /// Spawning or waiting on the subprocess failed.
    #[error("failed to run git {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The subcommand exited non-zero; stderr is captured for diagnostics.
    #[error("git {command} failed ({status}): {stderr}")]
    Command {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// All errors that can abort an orchestration run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the external git tool (commit/push stages propagate).
    #[error("git error: {0}")]
    Git(#[from] GitError),

    /// An error from the host note store (fetch stage).
    #[error("note store error: {0}")]
    Store(#[from] StoreError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
