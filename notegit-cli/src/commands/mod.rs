pub mod config;
pub mod daemon;
pub mod run;

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Resolve the settings file path from `--config` or `~/.notegit/config.yaml`.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => notegit_core::settings::settings_path()
            .context("could not determine the default settings path"),
    }
}

pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
