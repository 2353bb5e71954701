//! Children-by-parent index over the flat notebook/note listings.
//!
//! The host store hands back two flat vectors; the exporter needs to walk a
//! tree. [`NoteTree::build`] indexes both once so traversal never re-filters
//! the full listings per level. Notes whose parent notebook was not fetched
//! are counted as orphaned and excluded from traversal.

use std::collections::HashMap;

use crate::types::{Note, Notebook, NotebookId};

/// Indexed, traversable view of one fetched note collection.
#[derive(Debug, Default)]
pub struct NoteTree {
    notebooks_by_parent: HashMap<NotebookId, Vec<Notebook>>,
    notes_by_notebook: HashMap<NotebookId, Vec<Note>>,
    orphaned_notes: usize,
}

impl NoteTree {
    /// Index the flat listings. Host-provided order is preserved within each
    /// parent bucket; no deduplication is performed (host ids are trusted).
    pub fn build(notebooks: Vec<Notebook>, notes: Vec<Note>) -> Self {
        let known_ids: std::collections::HashSet<NotebookId> =
            notebooks.iter().map(|nb| nb.id.clone()).collect();

        let mut notebooks_by_parent: HashMap<NotebookId, Vec<Notebook>> = HashMap::new();
        for notebook in notebooks {
            notebooks_by_parent
                .entry(notebook.parent_id.clone())
                .or_default()
                .push(notebook);
        }

        let mut notes_by_notebook: HashMap<NotebookId, Vec<Note>> = HashMap::new();
        let mut orphaned_notes = 0;
        for note in notes {
            if known_ids.contains(&note.parent_id) {
                notes_by_notebook
                    .entry(note.parent_id.clone())
                    .or_default()
                    .push(note);
            } else {
                orphaned_notes += 1;
            }
        }

        Self {
            notebooks_by_parent,
            notes_by_notebook,
            orphaned_notes,
        }
    }

    /// Notebooks whose parent is `parent_id` (use [`NotebookId::root`] for
    /// the top level).
    pub fn child_notebooks(&self, parent_id: &NotebookId) -> &[Notebook] {
        self.notebooks_by_parent
            .get(parent_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Notes attached directly to the given notebook.
    pub fn notes_in(&self, notebook_id: &NotebookId) -> &[Note] {
        self.notes_by_notebook
            .get(notebook_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Notes whose parent id matched no fetched notebook. These are never
    /// exported; the count is surfaced so the drop is visible.
    pub fn orphaned_notes(&self) -> usize {
        self.orphaned_notes
    }

    /// Total notes reachable from the root.
    pub fn reachable_notes(&self) -> usize {
        self.notes_by_notebook.values().map(Vec::len).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
