//! Error types for notegit-store.

use thiserror::Error;

/// All errors that can arise when querying the host note store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport-level failure (connection refused, timeout, TLS, ...).
    #[error("host store request failed: {0}")]
    Transport(#[from] Box<ureq::Error>),

    /// The host answered but the payload did not match the expected shape.
    #[error("unexpected host store response for {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl From<ureq::Error> for StoreError {
    fn from(err: ureq::Error) -> Self {
        StoreError::Transport(Box::new(err))
    }
}
