//! Duplicate resolution: pick survivors, delete (or record) the rest.
//!
//! The resolver consumes the completed [`HashIndex`] read-only. For every
//! bucket with more than one member the first-inserted entry is canonical
//! and survives; each later entry's size is added to the bytes-saved
//! counter and the file is either deleted directly (no trash semantics) or,
//! in dry-run mode, recorded as a would-delete without touching the
//! filesystem.
//!
//! A deletion failure is logged and the remaining deletions proceed; the
//! failed path simply never appears in the deleted list, so the run log
//! shows the discrepancy between intent and outcome. There is no existence
//! re-check between scan and delete, so a file changed underneath us shows
//! up the same way.

use std::fs;
use std::path::PathBuf;

use crate::scanner::HashIndex;

/// Outcome of resolving the index.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Paths actually removed from the filesystem
    pub deleted_files: Vec<PathBuf>,
    /// Paths that would have been removed in dry-run mode
    pub potential_deleted_files: Vec<PathBuf>,
    /// Bytes reclaimed (or reclaimable, in dry-run mode)
    pub bytes_saved: u64,
    /// Number of duplicate candidates across all buckets (bucket sizes
    /// minus one each), counted even when an individual deletion fails
    pub duplicate_count: usize,
}

/// Resolve duplicates in the completed index.
///
/// Buckets are visited in digest first-appearance order; candidates within
/// a bucket in discovery order. Single-member buckets are left untouched.
#[must_use]
pub fn resolve(index: &HashIndex, dry_run: bool) -> Resolution {
    let mut resolution = Resolution::default();

    for bucket in index.values() {
        if bucket.len() < 2 {
            continue;
        }

        log::info!(
            "{} instances of {} found",
            bucket.len(),
            bucket[0].file_name
        );
        resolution.duplicate_count += bucket.len() - 1;

        for candidate in &bucket[1..] {
            resolution.bytes_saved += candidate.size;
            if dry_run {
                log::info!(
                    "dry run enabled, skipping delete of {}",
                    candidate.path.display()
                );
                resolution
                    .potential_deleted_files
                    .push(candidate.path.clone());
            } else {
                match fs::remove_file(&candidate.path) {
                    Ok(()) => {
                        log::info!("deleted {}", candidate.path.display());
                        resolution.deleted_files.push(candidate.path.clone());
                    }
                    Err(err) => {
                        log::error!("failed to delete {}: {}", candidate.path.display(), err);
                    }
                }
            }
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::HashedFile;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;

    fn entry(path: &Path, size: u64) -> HashedFile {
        HashedFile {
            file_name: path.file_name().unwrap().to_string_lossy().into_owned(),
            path: path.to_path_buf(),
            size,
        }
    }

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_resolve_deletes_all_but_first() {
        let dir = TempDir::new().unwrap();
        let a = write_file(dir.path(), "a.txt", b"0123456789");
        let b = write_file(dir.path(), "b.txt", b"0123456789");
        let c = write_file(dir.path(), "c.txt", b"0123456789");

        let mut index = HashIndex::new();
        index.insert(
            "digest".to_string(),
            vec![entry(&a, 10), entry(&b, 10), entry(&c, 10)],
        );

        let resolution = resolve(&index, false);

        assert!(a.exists(), "first-discovered member must survive");
        assert!(!b.exists());
        assert!(!c.exists());
        assert_eq!(resolution.deleted_files, vec![b, c]);
        assert_eq!(resolution.bytes_saved, 20);
        assert_eq!(resolution.duplicate_count, 2);
        assert!(resolution.potential_deleted_files.is_empty());
    }

    #[test]
    fn test_resolve_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let a = write_file(dir.path(), "a.txt", b"dup");
        let b = write_file(dir.path(), "b.txt", b"dup");

        let mut index = HashIndex::new();
        index.insert("digest".to_string(), vec![entry(&a, 3), entry(&b, 3)]);

        let resolution = resolve(&index, true);

        assert!(a.exists());
        assert!(b.exists());
        assert!(resolution.deleted_files.is_empty());
        assert_eq!(resolution.potential_deleted_files, vec![b]);
        assert_eq!(resolution.bytes_saved, 3);
        assert_eq!(resolution.duplicate_count, 1);
    }

    #[test]
    fn test_resolve_ignores_singleton_buckets() {
        let dir = TempDir::new().unwrap();
        let a = write_file(dir.path(), "only.txt", b"unique");

        let mut index = HashIndex::new();
        index.insert("digest".to_string(), vec![entry(&a, 6)]);

        let resolution = resolve(&index, false);

        assert!(a.exists());
        assert_eq!(resolution.duplicate_count, 0);
        assert_eq!(resolution.bytes_saved, 0);
        assert!(resolution.deleted_files.is_empty());
    }

    #[test]
    fn test_resolve_empty_index() {
        let resolution = resolve(&HashIndex::new(), false);
        assert_eq!(resolution.duplicate_count, 0);
        assert_eq!(resolution.bytes_saved, 0);
    }

    #[test]
    fn test_resolve_continues_after_delete_failure() {
        let dir = TempDir::new().unwrap();
        let a = write_file(dir.path(), "a.txt", b"dup");
        let missing = dir.path().join("vanished.txt");
        let c = write_file(dir.path(), "c.txt", b"dup");

        let mut index = HashIndex::new();
        index.insert(
            "digest".to_string(),
            vec![entry(&a, 3), entry(&missing, 3), entry(&c, 3)],
        );

        let resolution = resolve(&index, false);

        // The missing file's deletion failed but c was still removed.
        assert!(!c.exists());
        assert_eq!(resolution.deleted_files, vec![c]);
        // Intent still counted both candidates.
        assert_eq!(resolution.duplicate_count, 2);
        assert_eq!(resolution.bytes_saved, 6);
    }

    #[test]
    fn test_resolve_bucket_order_follows_index_order() {
        let dir = TempDir::new().unwrap();
        let a1 = write_file(dir.path(), "a1.txt", b"aa");
        let a2 = write_file(dir.path(), "a2.txt", b"aa");
        let b1 = write_file(dir.path(), "b1.txt", b"bb");
        let b2 = write_file(dir.path(), "b2.txt", b"bb");

        let mut index = HashIndex::new();
        index.insert("digest-a".to_string(), vec![entry(&a1, 2), entry(&a2, 2)]);
        index.insert("digest-b".to_string(), vec![entry(&b1, 2), entry(&b2, 2)]);

        let resolution = resolve(&index, true);
        assert_eq!(resolution.potential_deleted_files, vec![a2, b2]);
    }
}
