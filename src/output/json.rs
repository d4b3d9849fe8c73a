//! JSON report for scripting.
//!
//! # Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     { "hash": "9f86d0...", "size": 4, "files": ["/r/a.txt", "/r/sub/b.txt"] }
//!   ],
//!   "summary": {
//!     "generated_at": "2024-01-01T00:00:00+00:00",
//!     "roots": ["/r"],
//!     "total_files": 3,
//!     "total_size": 12,
//!     "unique_fingerprints": 2,
//!     "duplicate_groups": 1,
//!     "duplicate_files": 1,
//!     "reclaimable_space": 4,
//!     "scan_duration_ms": 2,
//!     "errors": [],
//!     "exit_code": 0,
//!     "exit_code_name": "DF000"
//!   }
//! }
//! ```
//!
//! Paths are written as recorded by the walker; they are not canonicalized.

use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use crate::duplicates::{DuplicateGroup, ScanSummary};
use crate::error::ExitCode;

/// One duplicate group.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// SHA-256 digest, 64 lowercase hex characters
    pub hash: String,
    /// File size in bytes
    pub size: u64,
    /// Member paths in discovery order
    pub files: Vec<String>,
}

impl From<&DuplicateGroup> for JsonDuplicateGroup {
    fn from(group: &DuplicateGroup) -> Self {
        Self {
            hash: group.hash_hex(),
            size: group.size,
            files: group
                .files
                .iter()
                .map(|path| path.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Scan statistics.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// RFC 3339 timestamp of report generation
    pub generated_at: String,
    /// Roots in walk order
    pub roots: Vec<String>,
    pub total_files: usize,
    pub total_size: u64,
    pub unique_fingerprints: usize,
    pub duplicate_groups: usize,
    /// Files beyond the first in each group
    pub duplicate_files: usize,
    pub reclaimable_space: u64,
    pub scan_duration_ms: u64,
    /// Errors skipped by a lenient scan
    pub errors: Vec<String>,
    pub exit_code: i32,
    /// Machine-readable exit code name (e.g., "DF000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Build from a scan summary and the exit code of this run.
    #[must_use]
    pub fn new(summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            roots: summary
                .roots
                .iter()
                .map(|root| root.to_string_lossy().into_owned())
                .collect(),
            total_files: summary.total_files,
            total_size: summary.total_size,
            unique_fingerprints: summary.unique_fingerprints,
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            reclaimable_space: summary.reclaimable_space,
            scan_duration_ms: u64::try_from(summary.scan_duration.as_millis()).unwrap_or(u64::MAX),
            errors: summary.errors.iter().map(ToString::to_string).collect(),
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON document.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    pub duplicates: Vec<JsonDuplicateGroup>,
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Create the document from scan results.
    ///
    /// ```
    /// use dupfind::duplicates::{DuplicateGroup, ScanSummary};
    /// use dupfind::error::ExitCode;
    /// use dupfind::output::JsonOutput;
    /// use std::path::PathBuf;
    ///
    /// let groups = vec![DuplicateGroup::new(
    ///     [0u8; 32],
    ///     4,
    ///     vec![PathBuf::from("/a"), PathBuf::from("/b")],
    /// )];
    /// let output = JsonOutput::new(&groups, &ScanSummary::default(), ExitCode::Success);
    /// assert_eq!(output.duplicates[0].files, vec!["/a", "/b"]);
    /// ```
    #[must_use]
    pub fn new(groups: &[DuplicateGroup], summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            duplicates: groups.iter().map(JsonDuplicateGroup::from).collect(),
            summary: JsonSummary::new(summary, exit_code),
        }
    }

    /// Serialize to a compact string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to a pretty-printed string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the document followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error during JSON output: {0}")]
    Io(#[from] std::io::Error),
}
