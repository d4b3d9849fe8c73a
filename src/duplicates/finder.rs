//! Duplicate finder implementation.
//!
//! # Overview
//!
//! This module drives a scan end to end:
//! 1. **Validate** - the root list is non-empty and every root is a directory
//! 2. **Walk + fingerprint** - for each root in order, walk it and hash every
//!    yielded file, one open file at a time, appending to a [`GroupMap`]
//! 3. **Report** - keep only fingerprints shared by two or more paths
//!
//! Walking and hashing are interleaved: each path is hashed as soon as the
//! walker yields it.
//!
//! # Error policy
//!
//! By default the first walk or hash error aborts the scan and no partial
//! result is returned. With [`FinderConfig::with_strict`]`(false)` errors are
//! logged, recorded in [`ScanSummary::errors`], and the scan continues.
//!
//! # Example
//!
//! ```no_run
//! use dupfind::duplicates::{DuplicateFinder, FinderConfig};
//! use dupfind::scanner::ExclusionSet;
//! use std::path::PathBuf;
//!
//! let config = FinderConfig::default().with_exclusions(ExclusionSet::new(["node_modules"]));
//! let finder = DuplicateFinder::new(config);
//!
//! let (groups, summary) = finder
//!     .find_duplicates_in_paths(vec![PathBuf::from("/home/user/Documents")])
//!     .unwrap();
//!
//! for group in &groups {
//!     println!("{}: {:?}", group.hash_hex(), group.files);
//! }
//! println!("Reclaimable space: {}", summary.reclaimable_display());
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytesize::ByteSize;

use super::{DuplicateGroup, GroupMap};
use crate::progress::ProgressCallback;
use crate::scanner::{ExclusionSet, Hasher, ScanError, Walker, WalkerConfig, DEFAULT_BUFFER_SIZE};

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Walker configuration for directory traversal.
    pub walker_config: WalkerConfig,
    /// Abort on the first walk or hash error (default: true).
    pub strict: bool,
    /// Read buffer size used while hashing.
    pub buffer_size: usize,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("walker_config", &self.walker_config)
            .field("strict", &self.strict)
            .field("buffer_size", &self.buffer_size)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            walker_config: WalkerConfig::default(),
            strict: true,
            buffer_size: DEFAULT_BUFFER_SIZE,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the excluded directory names.
    #[must_use]
    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.walker_config.exclusions = exclusions;
        self
    }

    /// Set fail-fast on any error.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the hashing read buffer size (minimum 1).
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Roots scanned, in order
    pub roots: Vec<PathBuf>,
    /// Number of files fingerprinted
    pub total_files: usize,
    /// Total bytes read while fingerprinting
    pub total_size: u64,
    /// Number of distinct fingerprints seen
    pub unique_fingerprints: usize,
    /// Number of groups with two or more members
    pub duplicate_groups: usize,
    /// Total number of duplicate files (excluding the first of each group)
    pub duplicate_files: usize,
    /// Space taken by every copy beyond the first
    pub reclaimable_space: u64,
    /// Duration of the entire scan
    pub scan_duration: Duration,
    /// Errors skipped during a non-strict scan
    pub errors: Vec<ScanError>,
}

impl ScanSummary {
    /// Whether any errors were skipped.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Format reclaimable space as human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize::b(self.reclaimable_space).to_string()
    }

    /// Format total size as human-readable string.
    #[must_use]
    pub fn total_size_display(&self) -> String {
        ByteSize::b(self.total_size).to_string()
    }
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// No root paths were supplied.
    #[error("No search directories provided")]
    NoRoots,

    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A root could not be inspected.
    #[error("I/O error for {path}: {source}")]
    IoWithPath {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A walk or hash error aborted a strict scan.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Duplicate finder that drives the walker and hasher over every root.
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let hasher = Hasher::new().with_buffer_size(config.buffer_size);
        Self { config, hasher }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Find duplicates under a single root.
    ///
    /// # Errors
    ///
    /// See [`DuplicateFinder::find_duplicates_in_paths`].
    pub fn find_duplicates(
        &self,
        path: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        self.find_duplicates_in_paths(vec![path.to_path_buf()])
    }

    /// Find duplicates across several roots, walked in the given order.
    ///
    /// Within each returned group, paths are in discovery order: root order
    /// first, then pre-order within a root. A path reachable from more than
    /// one root is recorded once, at its first discovery.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if:
    /// - `roots` is empty
    /// - any root does not exist or is not a directory
    /// - a walk or hash error occurs while `strict` is set
    pub fn find_duplicates_in_paths(
        &self,
        roots: Vec<PathBuf>,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = Instant::now();

        if roots.is_empty() {
            return Err(FinderError::NoRoots);
        }
        for root in &roots {
            validate_root(root)?;
        }

        let exclusions = &self.config.walker_config.exclusions;
        if !exclusions.is_empty() {
            let mut names: Vec<_> = exclusions.iter().map(|n| n.to_string_lossy()).collect();
            names.sort();
            log::debug!("Excluding directories named: {}", names.join(", "));
        }

        let mut map = GroupMap::new();
        let mut summary = ScanSummary::default();

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start("scanning", 0);
        }

        for root in &roots {
            log::info!("Scanning {}", root.display());
            if let Some(ref callback) = self.config.progress_callback {
                callback.on_message(&format!("Walking {}", root.display()));
            }
            self.scan_into(root, &mut map, &mut summary)?;
        }

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end("scanning");
        }

        summary.roots = roots;
        summary.unique_fingerprints = map.len();

        let groups = map.into_duplicates();
        summary.duplicate_groups = groups.len();
        summary.duplicate_files = groups.iter().map(DuplicateGroup::duplicate_count).sum();
        summary.reclaimable_space = groups.iter().map(DuplicateGroup::wasted_space).sum();
        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete: {} files ({}), {} duplicate groups, {} duplicate files, {} reclaimable",
            summary.total_files,
            summary.total_size_display(),
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.reclaimable_display()
        );

        Ok((groups, summary))
    }

    /// Walk one root, fingerprinting each yielded file into `map`.
    ///
    /// The root is not validated here.
    ///
    /// # Errors
    ///
    /// Returns the first walk or hash error while `strict` is set.
    pub fn scan_into(
        &self,
        root: &Path,
        map: &mut GroupMap,
        summary: &mut ScanSummary,
    ) -> Result<(), FinderError> {
        let walker = Walker::new(root, self.config.walker_config.clone());

        for result in walker.walk() {
            let path = match result {
                Ok(path) => path,
                Err(e) => {
                    self.handle_error(e, summary)?;
                    continue;
                }
            };

            // A vanished file keeps its own spelling; hashing reports the error.
            let identity = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
            if map.contains_path(&identity) {
                log::debug!("Already recorded under another path: {}", path.display());
                continue;
            }

            match self.hasher.full_hash_with_size(&path) {
                Ok((hash, size)) => {
                    summary.total_files += 1;
                    summary.total_size += size;
                    if let Some(ref callback) = self.config.progress_callback {
                        callback.on_progress(summary.total_files, &path.to_string_lossy());
                    }
                    map.insert_identified(hash, size, path, identity);
                }
                Err(e) => self.handle_error(e.into(), summary)?,
            }
        }

        Ok(())
    }

    fn handle_error(
        &self,
        error: ScanError,
        summary: &mut ScanSummary,
    ) -> Result<(), FinderError> {
        if self.config.strict {
            return Err(FinderError::Scan(error));
        }
        log::warn!("Skipping {}: {}", error.path().display(), error);
        summary.errors.push(error);
        Ok(())
    }
}

fn validate_root(root: &Path) -> Result<(), FinderError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(FinderError::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(FinderError::PathNotFound(root.to_path_buf()))
        }
        Err(source) => Err(FinderError::IoWithPath {
            path: root.to_path_buf(),
            source,
        }),
    }
}
