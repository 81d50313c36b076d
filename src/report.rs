//! Run log assembly and persistence.
//!
//! After resolution completes, the run's outcome is assembled into a
//! [`RunReport`] and written once as pretty-printed JSON to a file named
//! from the run's local start time:
//! `<dryrun_?>YYYYMMDD_HHMMSS_duplicate_checker.log`. The report is never
//! mutated afterward, and it is not written at all if the walk failed.
//!
//! # Schema
//!
//! ```json
//! {
//!   "deletedFiles": ["/path/b.txt"],
//!   "deletedFilesCount": 1,
//!   "duration": 42,
//!   "endTime": "2026-08-27T12:00:00.042Z",
//!   "isDryRun": false,
//!   "potentialDeletedFiles": [],
//!   "potentialDeletedFilesCount": 0,
//!   "startTime": "2026-08-27T12:00:00.000Z",
//!   "targetPath": ".",
//!   "totalBytesSaved": 10,
//!   "totalFilesCount": 4
//! }
//! ```

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::Serialize;

use crate::duplicates::Resolution;

/// Suffix shared by every run log file name.
const LOG_SUFFIX: &str = "_duplicate_checker.log";

/// Aggregate summary of one run, serialized camelCase.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Paths removed from the filesystem
    pub deleted_files: Vec<String>,
    /// Number of removed paths
    pub deleted_files_count: usize,
    /// Elapsed wall time in milliseconds
    pub duration: u64,
    /// Run end, ISO-8601 UTC
    pub end_time: String,
    /// Whether dry-run mode was active
    pub is_dry_run: bool,
    /// Paths that would have been removed in dry-run mode
    pub potential_deleted_files: Vec<String>,
    /// Number of would-delete paths
    pub potential_deleted_files_count: usize,
    /// Run start, ISO-8601 UTC
    pub start_time: String,
    /// Target path exactly as given on the command line
    pub target_path: String,
    /// Bytes reclaimed (or reclaimable, in dry-run mode)
    pub total_bytes_saved: u64,
    /// Every file discovered during the walk, hash failures included
    pub total_files_count: usize,

    /// Local start time, kept for deriving the log file name
    #[serde(skip)]
    started_at: DateTime<Local>,
}

impl RunReport {
    /// Assemble the report for a completed run.
    #[must_use]
    pub fn new(
        started_at: DateTime<Local>,
        ended_at: DateTime<Local>,
        target_path: &Path,
        is_dry_run: bool,
        total_files_count: usize,
        resolution: &Resolution,
    ) -> Self {
        let duration = (ended_at - started_at).num_milliseconds().max(0) as u64;
        Self {
            deleted_files: paths_to_strings(&resolution.deleted_files),
            deleted_files_count: resolution.deleted_files.len(),
            duration,
            end_time: to_iso(ended_at),
            is_dry_run,
            potential_deleted_files: paths_to_strings(&resolution.potential_deleted_files),
            potential_deleted_files_count: resolution.potential_deleted_files.len(),
            start_time: to_iso(started_at),
            target_path: target_path.display().to_string(),
            total_bytes_saved: resolution.bytes_saved,
            total_files_count,
            started_at,
        }
    }

    /// Log file name for this run, e.g. `20260827_120000_duplicate_checker.log`,
    /// prefixed with `dryrun_` when dry-run mode was active.
    #[must_use]
    pub fn file_name(&self) -> String {
        let stamp = self.started_at.format("%Y%m%d_%H%M%S");
        if self.is_dry_run {
            format!("dryrun_{stamp}{LOG_SUFFIX}")
        } else {
            format!("{stamp}{LOG_SUFFIX}")
        }
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (it should not for this
    /// struct, but the caller propagates rather than panics).
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the report into `dir` under [`Self::file_name`].
    ///
    /// Returns the path of the written file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the filesystem write fails.
    pub fn write_to_dir(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(self.file_name());
        let json = self.to_json_pretty().map_err(io::Error::other)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }
}

fn paths_to_strings(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.display().to_string()).collect()
}

fn to_iso(time: DateTime<Local>) -> String {
    time.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
