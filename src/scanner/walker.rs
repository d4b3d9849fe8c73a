//! Directory walker implementation using walkdir for sequential traversal.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct, which walks one root in
//! depth-first pre-order and yields the path of every regular file that
//! survives the skip rules:
//!
//! - Directories whose name starts with `.` are pruned with their subtree
//! - Directories whose name is in the [`ExclusionSet`] are pruned the same way
//! - Files whose name starts with `.` are skipped
//! - Symlinks (unless followed) and special files are skipped
//!
//! Children are visited in file-name order, so discovery order is stable
//! across runs. The root itself is always descended.
//!
//! Filesystem errors are yielded as [`ScanError`] items and never swallowed;
//! the caller decides whether they abort the scan.
//!
//! # Example
//!
//! ```no_run
//! use dupfind::scanner::{ExclusionSet, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig::new(ExclusionSet::new(["node_modules"]), false);
//! let walker = Walker::new(Path::new("/home/user/Documents"), config);
//!
//! let files: Result<Vec<_>, _> = walker.walk().collect();
//! println!("Found {} files", files.unwrap().len());
//! ```

use std::ffi::OsStr;
use std::fs::FileType;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{ExclusionSet, ScanError, WalkerConfig};

/// Per-entry traversal decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkDecision {
    /// Regular file to emit.
    Yield,
    /// Directory to descend into (not emitted itself).
    Descend,
    /// Skip this entry only.
    SkipEntry,
    /// Skip this directory and everything beneath it.
    SkipSubtree,
}

/// Coarse classification of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory.
    Directory,
    /// A regular file.
    File,
    /// Anything else: unfollowed symlinks, FIFOs, sockets, devices.
    Other,
}

impl EntryKind {
    /// Classify a file type as reported by the walk.
    #[must_use]
    pub fn of(file_type: FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// Whether a base name follows the dot-prefix hidden convention.
///
/// An empty name is not hidden.
#[must_use]
pub fn is_hidden_name(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

/// Decide what to do with an entry below the root.
#[must_use]
pub fn decide(name: &OsStr, kind: EntryKind, exclusions: &ExclusionSet) -> WalkDecision {
    match kind {
        EntryKind::Directory if is_hidden_name(name) || exclusions.contains(name) => {
            WalkDecision::SkipSubtree
        }
        EntryKind::Directory => WalkDecision::Descend,
        EntryKind::File if is_hidden_name(name) => WalkDecision::SkipEntry,
        EntryKind::File => WalkDecision::Yield,
        EntryKind::Other => WalkDecision::SkipEntry,
    }
}

/// Directory walker for file discovery under a single root.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    /// * `config` - Walker configuration options
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// The root this walker starts from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// [`decide`] with this walker's exclusions.
    #[must_use]
    pub fn decide(&self, name: &OsStr, kind: EntryKind) -> WalkDecision {
        decide(name, kind, &self.config.exclusions)
    }

    /// Walk the directory tree, yielding regular-file paths in pre-order.
    ///
    /// Each call starts a fresh traversal. Errors are yielded as
    /// [`ScanError`] values; iteration may continue past them, but callers
    /// that want fail-fast behavior simply stop at the first one.
    pub fn walk(&self) -> Walk<'_> {
        let inner = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter();

        Walk {
            inner,
            root: &self.root,
            exclusions: &self.config.exclusions,
        }
    }
}

/// Iterator returned by [`Walker::walk`].
pub struct Walk<'a> {
    inner: walkdir::IntoIter,
    root: &'a Path,
    exclusions: &'a ExclusionSet,
}

impl std::fmt::Debug for Walk<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walk")
            .field("root", &self.root)
            .field("exclusions", &self.exclusions)
            .finish_non_exhaustive()
    }
}

impl Iterator for Walk<'_> {
    type Item = Result<PathBuf, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    let err = ScanError::from_walkdir(self.root, e);
                    log::warn!("Walker error: {}", err);
                    return Some(Err(err));
                }
            };

            let kind = EntryKind::of(entry.file_type());

            // The root is scanned whatever its own name looks like.
            if entry.depth() == 0 && kind == EntryKind::Directory {
                continue;
            }

            match decide(entry.file_name(), kind, self.exclusions) {
                WalkDecision::Yield => return Some(Ok(entry.into_path())),
                WalkDecision::Descend => {}
                WalkDecision::SkipEntry => {
                    log::trace!("Skipping entry: {}", entry.path().display());
                }
                WalkDecision::SkipSubtree => {
                    log::trace!("Skipping directory: {}", entry.path().display());
                    self.inner.skip_current_dir();
                }
            }
        }
    }
}
