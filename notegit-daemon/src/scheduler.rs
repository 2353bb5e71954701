//! Timer loop around [`notegit_sync::run_once`].
//!
//! The timer is a thin driver: each tick reloads settings from disk, builds
//! fresh collaborators, and hands off to the synchronous pipeline on a
//! blocking thread. An in-flight guard skips ticks while a run is still
//! going, so a slow push can never overlap the next export.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use notegit_core::settings;
use notegit_store::JoplinClient;
use notegit_sync::{run_once, LogNotifier, RunOutcome};

use crate::error::DaemonError;

/// Start the scheduler and block the current thread until ctrl-c.
pub fn start_blocking(config_path: &Path) -> Result<(), DaemonError> {
    init_tracing();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| DaemonError::Runtime(format!("tokio runtime: {e}")))?;
    runtime.block_on(run(config_path.to_path_buf()))
}

/// Run the scheduler loop.
///
/// The interval is read once at startup; everything else is re-read from the
/// settings file at every tick so configuration edits take effect without a
/// restart.
pub async fn run(config_path: PathBuf) -> Result<(), DaemonError> {
    let initial = settings::load_at(&config_path)?;
    let period = Duration::from_secs(initial.sync_interval_minutes.max(1) * 60);
    tracing::info!(
        config = %config_path.display(),
        interval_minutes = initial.sync_interval_minutes,
        "scheduler started"
    );

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    interval.tick().await; // consume the immediate first tick

    let in_flight = Arc::new(AtomicBool::new(false));

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                match signal {
                    Ok(()) => {
                        tracing::info!("received ctrl-c, stopping scheduler");
                        return Ok(());
                    }
                    Err(err) => {
                        return Err(DaemonError::Runtime(format!("ctrl-c handler failed: {err}")));
                    }
                }
            }
            _ = interval.tick() => {
                if !try_begin_run(&in_flight) {
                    tracing::warn!("previous sync run still in flight, skipping this tick");
                    continue;
                }

                let config_path = config_path.clone();
                let in_flight = in_flight.clone();
                tokio::task::spawn_blocking(move || {
                    run_tick(&config_path);
                    in_flight.store(false, Ordering::SeqCst);
                });
            }
        }
    }
}

/// Claim the run slot; `false` means a run is already in flight.
fn try_begin_run(in_flight: &AtomicBool) -> bool {
    in_flight
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_ok()
}

/// One tick: fresh settings, fresh collaborators, one pipeline pass.
/// Errors end the tick, never the loop.
fn run_tick(config_path: &Path) {
    let settings = match settings::load_at(config_path) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!(error = %err, "could not load settings, skipping run");
            return;
        }
    };

    let store = JoplinClient::new(settings.api_base_url.clone(), settings.api_token.clone());
    let notifier = LogNotifier::new(settings.enable_notifications);

    match run_once(&settings, &store, &notifier) {
        Ok(RunOutcome::Completed(report)) => {
            tracing::debug!(?report, "scheduled run completed");
        }
        Ok(RunOutcome::Skipped { reason }) => {
            tracing::info!(%reason, "scheduled run skipped");
        }
        Err(err) => {
            tracing::error!(error = %err, "scheduled run aborted");
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_flight_guard_admits_one_run_at_a_time() {
        let guard = AtomicBool::new(false);
        assert!(try_begin_run(&guard), "first claim should succeed");
        assert!(!try_begin_run(&guard), "second claim must be rejected");

        guard.store(false, Ordering::SeqCst);
        assert!(try_begin_run(&guard), "claim succeeds again after release");
    }

    #[tokio::test]
    async fn run_fails_fast_on_missing_settings_file() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let missing = dir.path().join("config.yaml");
        let err = run(missing).await.expect_err("should fail");
        assert!(matches!(err, DaemonError::Core(_)));
    }
}
