//! Single-level directory listing.
//!
//! Produces a fully-materialized, name-sorted snapshot of a directory's
//! immediate children. Each entry gets exactly one non-following stat
//! (`symlink_metadata`), so symbolic links are classified by their own link
//! status rather than their target. Recursion is the walker's job, not ours.

use std::fs;
use std::path::Path;

use super::{DirEntryNode, DirectoryNode, FileNode, ScanError};

/// List the immediate children of `dir`, sorted by name.
///
/// Symlinks and other special files (sockets, devices) are neither regular
/// files nor directories under a non-following stat, so they are skipped
/// with a trace log.
///
/// # Errors
///
/// Returns a [`ScanError`] if the directory cannot be read or an entry
/// cannot be stat'ed. The caller decides whether that is fatal.
pub fn list_dir(dir: &Path) -> Result<Vec<DirEntryNode>, ScanError> {
    let read_dir = fs::read_dir(dir).map_err(|e| ScanError::from_io(dir, e))?;

    let mut names = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| ScanError::from_io(dir, e))?;
        names.push(entry.file_name());
    }
    names.sort();

    let mut contents = Vec::with_capacity(names.len());
    for name in names {
        let full_path = dir.join(&name);
        let metadata =
            fs::symlink_metadata(&full_path).map_err(|e| ScanError::from_io(&full_path, e))?;
        let file_type = metadata.file_type();
        let name = name.to_string_lossy().into_owned();

        if file_type.is_dir() {
            contents.push(DirEntryNode::Directory(DirectoryNode {
                name,
                path: full_path,
            }));
        } else if file_type.is_file() {
            contents.push(DirEntryNode::File(FileNode {
                name,
                path: full_path,
                size: metadata.len(),
            }));
        } else {
            log::trace!("skipping special entry: {}", full_path.display());
        }
    }

    Ok(contents)
}
