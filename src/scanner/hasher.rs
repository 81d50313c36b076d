//! Streaming file hasher with a configurable digest algorithm.
//!
//! # Overview
//!
//! Files are read in fixed-size chunks and fed to the selected digest, so
//! hashing is safe for arbitrarily large files. The result is a lowercase
//! hex string. Read failures surface as [`HashError`] values rather than
//! being swallowed; the walker decides what to do with them.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use sha1::{Digest, Sha1};
use sha2::{Sha256, Sha512};

use super::HashError;

/// Read buffer size for streaming hash computation.
const CHUNK_SIZE: usize = 64 * 1024;

/// Supported digest algorithms.
///
/// Parsed from the `--algorithm` CLI flag via [`FromStr`], so an unknown
/// name fails at argument parsing, before any filesystem work begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// SHA-1 (default, matching the historical behavior of this tool)
    #[default]
    Sha1,
    /// SHA-256
    Sha256,
    /// SHA-512
    Sha512,
    /// BLAKE3
    Blake3,
}

impl Algorithm {
    /// Canonical name of the algorithm.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
            Self::Blake3 => "blake3",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(Self::Sha1),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha512" | "sha-512" => Ok(Self::Sha512),
            "blake3" | "b3" => Ok(Self::Blake3),
            other => Err(format!(
                "unsupported digest algorithm '{other}' (expected one of: sha1, sha256, sha512, blake3)"
            )),
        }
    }
}

/// Hash a file's content with the given algorithm, streaming its bytes.
///
/// Returns the lowercase hex digest.
///
/// # Errors
///
/// Returns a [`HashError`] if the file cannot be opened or read.
pub fn hash_file(path: &Path, algorithm: Algorithm) -> Result<String, HashError> {
    let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
    match algorithm {
        Algorithm::Sha1 => digest_stream::<Sha1>(file, path),
        Algorithm::Sha256 => digest_stream::<Sha256>(file, path),
        Algorithm::Sha512 => digest_stream::<Sha512>(file, path),
        Algorithm::Blake3 => blake3_stream(file, path),
    }
}

/// Stream a file through a RustCrypto digest.
fn digest_stream<D: Digest>(mut file: File, path: &Path) -> Result<String, HashError> {
    let mut hasher = D::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf).map_err(|e| HashError::from_io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(bytes_to_hex(hasher.finalize().as_slice()))
}

/// Stream a file through BLAKE3, which has its own hasher type.
fn blake3_stream(mut file: File, path: &Path) -> Result<String, HashError> {
    let mut hasher = blake3::Hasher::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf).map_err(|e| HashError::from_io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}

/// Convert digest bytes to a lowercase hexadecimal string.
#[must_use]
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        use std::fmt::Write;
        let _ = write!(hex, "{b:02x}");
    }
    hex
}
