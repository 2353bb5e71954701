use thiserror::Error;

/// Error surface for the scheduler runtime.
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("settings error: {0}")]
    Core(#[from] notegit_core::CoreError),

    #[error("runtime error: {0}")]
    Runtime(String),
}
