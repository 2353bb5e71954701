//! # notegit-store
//!
//! The host note store boundary: a [`NoteStore`] trait covering the two
//! listings the exporter needs, plus [`JoplinClient`], an HTTP implementation
//! against the Joplin Data API.
//!
//! Every run fetches the full collection; no incremental state is kept.

pub mod client;
pub mod error;

pub use client::JoplinClient;
pub use error::StoreError;

use notegit_core::{Note, Notebook};

/// Read-only query interface onto the host's note collection.
pub trait NoteStore {
    /// The complete notebook hierarchy, one call.
    fn list_notebooks(&self) -> Result<Vec<Notebook>, StoreError>;

    /// The complete note set, accumulated across the host's page cursor.
    fn list_notes(&self) -> Result<Vec<Note>, StoreError>;
}
