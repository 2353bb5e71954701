//! Best-effort user-visible reporting of orchestration outcomes.
//!
//! The host notification surface is a trait so the CLI can show messages
//! directly while the daemon (and tests) substitute their own sinks. The
//! enabled/disabled gate lives in the implementation: a disabled notifier
//! falls back to a log line rather than staying silent.

/// Sink for run-level messages (skipped runs, stage failures, summaries).
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Notifier that reports through the process log.
///
/// With notifications enabled messages are logged at warn level so they stand
/// out in an unattended daemon log; disabled, they drop to info.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier {
    enabled: bool,
}

impl LogNotifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        if self.enabled {
            tracing::warn!("{message}");
        } else {
            tracing::info!("{message}");
        }
    }
}
