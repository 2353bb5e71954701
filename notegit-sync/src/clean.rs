//! Directory reconciler.
//!
//! Before each export the target directory is cleared of everything except
//! the version-control metadata (`.git`) and its ignore rules (`.gitignore`),
//! so notes deleted in the host store never linger in the working copy.

use std::path::Path;

use crate::error::{io_err, SyncError};

/// Immediate children that survive a clean.
const PRESERVED: [&str; 2] = [".git", ".gitignore"];

/// Create the directory if absent, otherwise remove every immediate child
/// except the preserved version-control entries.
pub fn clean_directory(dir: &Path) -> Result<(), SyncError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
        return Ok(());
    }

    for entry in std::fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let name = entry.file_name();
        if PRESERVED.iter().any(|keep| name == *keep) {
            continue;
        }

        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| io_err(&path, e))?;
        if file_type.is_dir() {
            std::fs::remove_dir_all(&path).map_err(|e| io_err(&path, e))?;
        } else {
            std::fs::remove_file(&path).map_err(|e| io_err(&path, e))?;
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
