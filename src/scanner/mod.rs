//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Single-level directory snapshots ([`lister`])
//! - Streaming content hashing with a configurable algorithm ([`hasher`])
//! - Recursive tree walking with per-level parallel hashing ([`walker`])

pub mod hasher;
pub mod lister;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use hasher::Algorithm;
pub use walker::{HashIndex, WalkReport, Walker};

/// A regular file observed in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    /// File name (final path component)
    pub name: String,
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

/// A subdirectory observed in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Directory name (final path component)
    pub name: String,
    /// Full path to the directory
    pub path: PathBuf,
}

/// One immediate child of a listed directory.
///
/// Entries that are neither regular files nor directories (symlinks,
/// sockets, devices) are classified by their own non-followed status and
/// never appear here; the lister skips them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirEntryNode {
    /// A regular file
    File(FileNode),
    /// A subdirectory
    Directory(DirectoryNode),
}

impl DirEntryNode {
    /// Name of the underlying node.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File(f) => &f.name,
            Self::Directory(d) => &d.name,
        }
    }
}

/// A file that has been successfully hashed and folded into the index.
///
/// The digest itself is the index key, so it is not repeated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedFile {
    /// File name (final path component)
    pub file_name: String,
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl From<FileNode> for HashedFile {
    fn from(node: FileNode) -> Self {
        Self {
            file_name: node.name,
            path: node.path,
            size: node.size,
        }
    }
}

/// Errors that can occur while listing directories.
///
/// These are fatal to the run: an unreadable directory aborts the walk.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified path was not found.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading a directory.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while listing a directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error for the given path.
    #[must_use]
    pub fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match error.kind() {
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            ErrorKind::NotADirectory => Self::NotADirectory(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Errors that can occur while hashing a single file.
///
/// These are absorbed by the walker: the file is excluded from grouping and
/// the run continues.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The file was not found (may have been removed mid-walk).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while streaming the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Classify an I/O error for the given path.
    #[must_use]
    pub fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match error.kind() {
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}
