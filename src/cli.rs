//! Command-line interface definitions.
//!
//! All arguments use the clap derive API. The three scan flags are
//! order-independent; `--dryrun` is presence-only.
//!
//! # Example
//!
//! ```bash
//! # Report duplicates under the current directory without deleting
//! dupecheck --dryrun
//!
//! # Deduplicate a tree with BLAKE3
//! dupecheck --path ~/Downloads --algorithm blake3
//!
//! # Verbose mode for per-file hash output
//! dupecheck -v --path ~/Downloads --dryrun
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::scanner::Algorithm;

/// Recursive duplicate file detector.
///
/// Walks the target directory, hashes every file, groups files by content
/// digest, and deletes all but the first-discovered member of each
/// duplicate group (unless --dryrun is given). Writes a JSON run log to
/// the current directory.
#[derive(Debug, Parser)]
#[command(name = "dupecheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to scan
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub path: PathBuf,

    /// Digest algorithm (sha1, sha256, sha512, blake3)
    #[arg(long, value_name = "NAME", default_value = "sha1")]
    pub algorithm: Algorithm,

    /// Report duplicates without deleting anything
    #[arg(long)]
    pub dryrun: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
