//! Recurring scheduler driving the export-then-sync pipeline.

mod error;
mod scheduler;

pub use error::DaemonError;
pub use scheduler::{run, start_blocking};
