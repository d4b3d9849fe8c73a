//! SHA-256 file hasher with streaming support.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing SHA-256
//! fingerprints of whole file contents. Files are read through a fixed-size
//! buffer, so memory use does not depend on file size, and each file is
//! closed before the call returns.
//!
//! Fingerprints are 32 raw bytes ([`Hash`]); [`hash_to_hex`] renders the
//! stable lowercase-hex form used as a report key.
//!
//! # Example
//!
//! ```no_run
//! use dupfind::scanner::{hash_to_hex, Hasher};
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let hash = hasher.full_hash(Path::new("Cargo.toml")).unwrap();
//! println!("{}", hash_to_hex(&hash));
//! ```

use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::Path;

use sha2::digest::Output;
use sha2::{Digest, Sha256};

use super::HashError;

/// A 32-byte SHA-256 digest.
pub type Hash = [u8; 32];

/// Default read buffer size (64 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Render a hash as 64 lowercase hexadecimal characters.
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    format!("{:x}", Output::<Sha256>::from_slice(hash))
}

/// Parse a 64-character hexadecimal string (either case) back into a hash.
///
/// Returns `None` on a wrong length or any non-hex character.
#[must_use]
pub fn hex_to_hash(hex: &str) -> Option<Hash> {
    if hex.len() != 64 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let mut hash = [0u8; 32];
    for (i, byte) in hash.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(hash)
}

/// Streaming SHA-256 hasher for file contents.
#[derive(Debug, Clone)]
pub struct Hasher {
    buffer_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher with the default buffer size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Set the read buffer size in bytes (minimum 1).
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// The read buffer size in bytes.
    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Compute the SHA-256 hash of a file's entire content.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or fully read.
    pub fn full_hash(&self, path: &Path) -> Result<Hash, HashError> {
        self.full_hash_with_size(path).map(|(hash, _)| hash)
    }

    /// Compute the hash of a file along with the number of bytes consumed.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or fully read.
    pub fn full_hash_with_size(&self, path: &Path) -> Result<(Hash, u64), HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let result = self.digest(file).map_err(|e| HashError::from_io(path, e))?;
        log::trace!("Hashed {} ({} bytes)", path.display(), result.1);
        Ok(result)
    }

    /// Hash everything readable from `reader`.
    ///
    /// # Errors
    ///
    /// Propagates any read error other than [`ErrorKind::Interrupted`].
    pub fn hash_reader<R: Read>(&self, reader: R) -> io::Result<Hash> {
        self.digest(reader).map(|(hash, _)| hash)
    }

    /// Hash an in-memory byte slice.
    #[must_use]
    pub fn hash_bytes(&self, data: &[u8]) -> Hash {
        finish(Sha256::new_with_prefix(data))
    }

    fn digest<R: Read>(&self, mut reader: R) -> io::Result<(Hash, u64)> {
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; self.buffer_size];
        let mut total = 0u64;

        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => {
                    hasher.update(&buffer[..n]);
                    total += n as u64;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok((finish(hasher), total))
    }
}

fn finish(hasher: Sha256) -> Hash {
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&hasher.finalize());
    hash
}
