//! Notegit core library — domain types, settings persistence, note tree
//! indexing, filename sanitizing.
//!
//! Public API surface:
//! - [`types`] — [`Notebook`], [`Note`] and id newtypes
//! - [`settings`] — load / save / init of the YAML settings file
//! - [`tree`] — [`NoteTree`] children-by-parent index
//! - [`sanitize`] — title → safe path segment
//! - [`error`] — [`CoreError`]

pub mod error;
pub mod sanitize;
pub mod settings;
pub mod tree;
pub mod types;

pub use error::CoreError;
pub use sanitize::sanitize_title;
pub use settings::Settings;
pub use tree::NoteTree;
pub use types::{Note, NoteId, Notebook, NotebookId};
