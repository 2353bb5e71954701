//! Structured wrapper around the external git executable.
//!
//! Every invocation is an argument vector — configuration strings (branch,
//! remote URL, executable path) are never interpolated into a shell line.
//! Non-zero exits surface as [`GitError::Command`] carrying the subcommand
//! and captured stderr.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::GitError;

/// One git executable bound to one working directory.
#[derive(Debug, Clone)]
pub struct Git {
    program: PathBuf,
    workdir: PathBuf,
}

impl Git {
    pub fn new(program: impl Into<PathBuf>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run a subcommand with cwd set to the working directory and return
    /// trimmed stdout.
    pub fn run(&self, args: &[&str]) -> Result<String, GitError> {
        self.run_with(args, Some(&self.workdir))
    }

    /// Run a subcommand without a working directory. Only the initial
    /// `clone <url> <dir>` uses this; the target directory may not be a
    /// repository yet.
    pub fn run_detached(&self, args: &[&str]) -> Result<String, GitError> {
        self.run_with(args, None)
    }

    fn run_with(&self, args: &[&str], cwd: Option<&Path>) -> Result<String, GitError> {
        let command = args.join(" ");
        tracing::debug!(git = %self.program.display(), %command, "running git");

        let mut invocation = Command::new(&self.program);
        invocation.args(args);
        if let Some(cwd) = cwd {
            invocation.current_dir(cwd);
        }

        let output = invocation.output().map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                GitError::ExecutableNotFound {
                    path: self.program.clone(),
                }
            } else {
                GitError::Spawn {
                    command: command.clone(),
                    source,
                }
            }
        })?;

        check_status(command, output)
    }

    // -- spec'd subcommands -------------------------------------------------

    pub fn init(&self) -> Result<(), GitError> {
        self.run(&["init"]).map(drop)
    }

    pub fn clone_into(&self, url: &str) -> Result<(), GitError> {
        let dir = self.workdir.display().to_string();
        self.run_detached(&["clone", url, &dir]).map(drop)
    }

    /// Checkout-or-create: try the plain checkout first, fall back to
    /// creating the branch when it does not exist yet.
    pub fn checkout_or_create(&self, branch: &str) -> Result<(), GitError> {
        match self.run(&["checkout", branch]) {
            Ok(_) => Ok(()),
            Err(GitError::Command { .. }) => self.run(&["checkout", "-b", branch]).map(drop),
            Err(other) => Err(other),
        }
    }

    pub fn checkout_new(&self, branch: &str) -> Result<(), GitError> {
        self.run(&["checkout", "-b", branch]).map(drop)
    }

    pub fn pull_origin(&self, branch: &str) -> Result<(), GitError> {
        self.run(&["pull", "origin", branch]).map(drop)
    }

    pub fn add_all(&self) -> Result<(), GitError> {
        self.run(&["add", "."]).map(drop)
    }

    /// Machine-readable working-copy status; empty output means nothing to
    /// commit.
    pub fn status_porcelain(&self) -> Result<String, GitError> {
        self.run(&["status", "--porcelain"])
    }

    pub fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run(&["commit", "-m", message]).map(drop)
    }

    pub fn remotes(&self) -> Result<String, GitError> {
        self.run(&["remote", "-v"])
    }

    pub fn remote_add_origin(&self, url: &str) -> Result<(), GitError> {
        self.run(&["remote", "add", "origin", url]).map(drop)
    }

    pub fn push_force(&self, branch: &str) -> Result<(), GitError> {
        self.run(&["push", "origin", branch, "--set-upstream", "--force"])
            .map(drop)
    }
}

fn check_status(command: String, output: Output) -> Result<String, GitError> {
    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    tracing::error!(%command, status = %output.status, %stderr, "git command failed");
    Err(GitError::Command {
        command,
        status: output.status,
        stderr,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
