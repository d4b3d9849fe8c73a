//! Scanner module for directory traversal and file fingerprinting.
//!
//! This module provides functionality for:
//! - Sequential, pre-order directory walking using walkdir
//! - Hidden-entry and excluded-directory pruning during descent
//! - SHA-256 content fingerprints of whole files
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: SHA-256 file hashing (streaming)
//!
//! # Example
//!
//! ```no_run
//! use dupfind::scanner::{ExclusionSet, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig {
//!     exclusions: ExclusionSet::new(["node_modules", "target"]),
//!     ..Default::default()
//! };
//!
//! let walker = Walker::new(Path::new("/home/user/projects"), config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(path) => println!("{}", path.display()),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

// Re-export main types
pub use hasher::{hash_to_hex, hex_to_hash, Hash, Hasher, DEFAULT_BUFFER_SIZE};
pub use walker::{decide, is_hidden_name, EntryKind, Walk, WalkDecision, Walker};

/// Directory basenames whose subtrees are never descended into.
///
/// Matching is exact and case-sensitive against the entry's file name only,
/// so a name matches at any depth and `node_modules` never matches
/// `node_modules2`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    names: HashSet<OsString>,
}

impl ExclusionSet {
    /// Build an exclusion set from directory names. Empty names are dropped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            names: names
                .into_iter()
                .map(Into::into)
                .filter(|name: &OsString| !name.is_empty())
                .collect(),
        }
    }

    /// Whether `name` is one of the excluded directory names.
    #[must_use]
    pub fn contains(&self, name: &OsStr) -> bool {
        self.names.contains(name)
    }

    /// Number of distinct names in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over the excluded names in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &OsStr> {
        self.names.iter().map(OsString::as_os_str)
    }
}

impl<S: Into<OsString>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Directory names pruned wherever they occur.
    pub exclusions: ExclusionSet,

    /// Follow symbolic links during traversal.
    /// Off by default, in which case links are skipped entirely.
    pub follow_symlinks: bool,
}

impl WalkerConfig {
    /// Create a new configuration.
    ///
    /// # Arguments
    ///
    /// * `exclusions` - Directory names to prune
    /// * `follow_symlinks` - Whether to follow symbolic links
    #[must_use]
    pub fn new(exclusions: ExclusionSet, follow_symlinks: bool) -> Self {
        Self {
            exclusions,
            follow_symlinks,
        }
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// Following links led back to an ancestor directory.
    #[error("Symlink loop: {path} points back to {ancestor}")]
    Loop {
        /// Path of the link that closes the loop
        path: PathBuf,
        /// Ancestor directory the link resolves to
        ancestor: PathBuf,
    },

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A discovered file could not be fingerprinted.
    #[error(transparent)]
    Hash(#[from] HashError),
}

impl ScanError {
    /// Convert a walkdir error, falling back to `root` when the error has no path.
    pub(crate) fn from_walkdir(root: &Path, error: walkdir::Error) -> Self {
        let path = error
            .path()
            .map_or_else(|| root.to_path_buf(), Path::to_path_buf);

        if let Some(ancestor) = error.loop_ancestor() {
            return Self::Loop {
                path,
                ancestor: ancestor.to_path_buf(),
            };
        }

        match error.io_error().map(std::io::Error::kind) {
            Some(ErrorKind::PermissionDenied) => Self::PermissionDenied(path),
            Some(ErrorKind::NotFound) => Self::NotFound(path),
            _ => Self::Io {
                path,
                source: error.into(),
            },
        }
    }

    /// The path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(path) | Self::NotFound(path) => path,
            Self::Loop { path, .. } | Self::Io { path, .. } => path,
            Self::Hash(err) => err.path(),
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
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
    pub(crate) fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// The file that could not be hashed.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path) | Self::PermissionDenied(path) => path,
            Self::Io { path, .. } => path,
        }
    }
}
