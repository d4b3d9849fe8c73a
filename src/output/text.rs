//! Plain-text report.
//!
//! A fixed header line, then one line per duplicate group with the member
//! paths joined by `|`. Groups and members keep discovery order.

use std::io::{self, Write};

use yansi::Paint;

use crate::duplicates::DuplicateGroup;

/// Header printed before the groups.
pub const HEADER: &str = "The files in each line below appear to be duplicates based upon a sha256 hash of their contents.";

/// Separator between paths on a group line.
pub const SEPARATOR: &str = "|";

/// Text output formatter.
#[derive(Debug)]
pub struct TextOutput<'a> {
    groups: &'a [DuplicateGroup],
    color: bool,
}

impl<'a> TextOutput<'a> {
    /// Create a formatter without color.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup]) -> Self {
        Self {
            groups,
            color: false,
        }
    }

    /// Bold the header line.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Render a single group line.
    #[must_use]
    pub fn format_group(group: &DuplicateGroup) -> String {
        group
            .files
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }

    /// Write the report.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        if self.color {
            writeln!(writer, "{}", HEADER.bold())?;
        } else {
            writeln!(writer, "{HEADER}")?;
        }

        for group in self.groups {
            writeln!(writer, "{}", Self::format_group(group))?;
        }
        writer.flush()
    }

    /// Render the report into a string.
    ///
    /// # Errors
    ///
    /// Returns an error only if formatting fails.
    pub fn to_string(&self) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
