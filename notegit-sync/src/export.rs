//! Materialize the fetched note tree as a filesystem tree.
//!
//! Each notebook becomes a directory named after its sanitized title; each
//! note becomes `<sanitized title>.md` containing the raw body, directly
//! under its parent notebook's directory. Directory nesting mirrors the
//! notebook parent/child relationships exactly.
//!
//! A filesystem error aborts the remainder of the walk; files already
//! written stay on disk (the next run's clean pass resets the tree).
//!
//! A notebook whose title sanitizes to the empty string (an all-emoji title,
//! say) resolves to its parent's directory, so its notes and children merge
//! into the parent. Same accepted-collision family as identical sanitized
//! titles; see the sanitizer docs.

use std::path::Path;

use notegit_core::{sanitize_title, NoteTree, NotebookId};

use crate::error::{io_err, SyncError};

/// Counts from one export pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportReport {
    pub notebooks_created: usize,
    pub notes_written: usize,
    /// Notes whose parent id matched no fetched notebook; never written.
    pub orphaned_notes: usize,
}

/// Walk the tree from the synthetic root and write every reachable note.
pub fn export_tree(root: &Path, tree: &NoteTree) -> Result<ExportReport, SyncError> {
    let mut report = ExportReport {
        orphaned_notes: tree.orphaned_notes(),
        ..ExportReport::default()
    };
    export_notebooks(root, tree, &NotebookId::root(), &mut report)?;

    if report.orphaned_notes > 0 {
        tracing::warn!(
            orphaned = report.orphaned_notes,
            "notes referencing unknown notebooks were not exported"
        );
    }
    Ok(report)
}

fn export_notebooks(
    dir: &Path,
    tree: &NoteTree,
    parent_id: &NotebookId,
    report: &mut ExportReport,
) -> Result<(), SyncError> {
    for notebook in tree.child_notebooks(parent_id) {
        let notebook_dir = dir.join(sanitize_title(&notebook.title));
        if !notebook_dir.exists() {
            std::fs::create_dir_all(&notebook_dir).map_err(|e| io_err(&notebook_dir, e))?;
            report.notebooks_created += 1;
        }

        for note in tree.notes_in(&notebook.id) {
            let file = notebook_dir.join(format!("{}.md", sanitize_title(&note.title)));
            std::fs::write(&file, &note.body).map_err(|e| io_err(&file, e))?;
            report.notes_written += 1;
        }

        export_notebooks(&notebook_dir, tree, &notebook.id, report)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
