//! CSV report for spreadsheets.
//!
//! One row per duplicate file, with columns:
//!
//! - `group_id`: 1-based group number, in report order
//! - `hash`: SHA-256 digest (hexadecimal)
//! - `path`: file path as recorded by the walker
//! - `size`: file size in bytes

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::duplicates::DuplicateGroup;

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    group_id: usize,
    hash: &'a str,
    path: String,
    size: u64,
}

/// CSV output formatter.
#[derive(Debug)]
pub struct CsvOutput<'a> {
    groups: &'a [DuplicateGroup],
}

impl<'a> CsvOutput<'a> {
    /// Create a CSV formatter over the groups, numbered in the given order.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup]) -> Self {
        Self { groups }
    }

    /// Write the header and every row.
    ///
    /// The header is written even when there are no groups.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer.write_record(["group_id", "hash", "path", "size"])?;

        for (idx, group) in self.groups.iter().enumerate() {
            let hash = group.hash_hex();
            for path in &group.files {
                csv_writer.serialize(CsvRow {
                    group_id: idx + 1,
                    hash: &hash,
                    path: path.to_string_lossy().into_owned(),
                    size: group.size,
                })?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Render the CSV into a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
