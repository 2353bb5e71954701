//! Domain types for the host note collection.
//!
//! Notebooks and notes are owned by the host store and read-only here; both
//! carry the host's opaque string identifiers. A notebook with an empty
//! parent id sits at the root of the hierarchy.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed host identifier for a notebook.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct NotebookId(pub String);

impl NotebookId {
    /// The synthetic root parent — notebooks whose parent id is empty hang
    /// directly off the export directory.
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NotebookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for NotebookId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NotebookId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed host identifier for a note.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteId(pub String);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for NoteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A folder-like container node in the host's note hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    pub id: NotebookId,
    pub title: String,
    /// Empty for root-level notebooks.
    #[serde(default)]
    pub parent_id: NotebookId,
}

/// A leaf text document belonging to exactly one notebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub parent_id: NotebookId,
    #[serde(default)]
    pub updated_time: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_display() {
        assert_eq!(NotebookId::from("abc123").to_string(), "abc123");
        assert_eq!(NoteId::from("n-01").to_string(), "n-01");
    }

    #[test]
    fn root_notebook_id_is_empty() {
        assert!(NotebookId::root().is_root());
        assert!(!NotebookId::from("x").is_root());
    }

    #[test]
    fn note_deserializes_without_updated_time() {
        let note: Note = serde_yaml::from_str(
            "id: n1\ntitle: Todo\nbody: '- x'\nparent_id: b1\n",
        )
        .expect("deserialize");
        assert_eq!(note.body, "- x");
        assert!(note.updated_time.is_none());
    }
}
