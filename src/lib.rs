//! dupecheck - recursive duplicate file detector.
//!
//! Walks a directory tree, hashes every file with a configurable digest
//! algorithm, groups files by content hash, and deletes (or, in dry-run
//! mode, merely reports) all but the first-discovered member of each
//! duplicate group. Each run writes a pretty-printed JSON log summarizing
//! bytes saved, deleted paths, and timing.

pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod report;
pub mod scanner;

use std::path::Path;

use anyhow::{bail, Context, Result};
use bytesize::ByteSize;
use chrono::Local;

use cli::Cli;
use error::ExitCode;
use report::RunReport;
use scanner::Walker;

/// Run one scan -> group -> act -> report cycle.
///
/// The run log is written into the current working directory; it is
/// skipped entirely if the walk fails.
///
/// # Errors
///
/// Returns an error if the target path does not exist, if any directory in
/// the subtree cannot be listed, or if the run log cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    if !cli.path.exists() {
        bail!("path provided does not exist: {}", cli.path.display());
    }

    if cli.dryrun {
        log::info!("dry run: no files will be deleted");
    } else {
        log::warn!("this is not a dry run, duplicate files will be deleted");
    }

    let started_at = Local::now();

    let walk = Walker::new(cli.algorithm)
        .walk(&cli.path)
        .with_context(|| format!("walk failed under {}", cli.path.display()))?;

    let resolution = duplicates::resolve(&walk.index, cli.dryrun);

    log::info!(
        "there are {} duplicate files out of {}",
        resolution.duplicate_count,
        walk.total_files
    );
    if cli.dryrun {
        log::info!(
            "{} reclaimable by deleting {} files",
            ByteSize(resolution.bytes_saved),
            resolution.potential_deleted_files.len()
        );
    } else if resolution.duplicate_count > 0 {
        log::info!(
            "{} reclaimed by deleting {} files",
            ByteSize(resolution.bytes_saved),
            resolution.deleted_files.len()
        );
    }

    let ended_at = Local::now();
    let run_report = RunReport::new(
        started_at,
        ended_at,
        &cli.path,
        cli.dryrun,
        walk.total_files,
        &resolution,
    );
    let log_path = run_report
        .write_to_dir(Path::new("."))
        .context("failed to write run log")?;
    log::info!("run log written to {}", log_path.display());

    Ok(ExitCode::Success)
}
