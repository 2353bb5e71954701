//! `notegit daemon` — run the scheduler in the foreground.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

/// Arguments for `notegit daemon`.
#[derive(Args, Debug)]
pub struct DaemonArgs {
    /// Settings file (defaults to ~/.notegit/config.yaml).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl DaemonArgs {
    pub fn run(self) -> Result<()> {
        let config_path = super::resolve_config_path(self.config)?;
        notegit_daemon::start_blocking(&config_path)
            .with_context(|| format!("scheduler failed (config: {})", config_path.display()))
    }
}
