//! Report formatters for duplicate scan results.
//!
//! - [`TextOutput`]: the console report, one `|`-joined line per group
//! - [`JsonOutput`]: groups plus summary for automation
//! - [`CsvOutput`]: one row per duplicate file for spreadsheets
//!
//! # Example
//!
//! ```no_run
//! use dupfind::duplicates::DuplicateFinder;
//! use dupfind::output::TextOutput;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, _summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! TextOutput::new(&groups).write_to(std::io::stdout()).unwrap();
//! ```

pub mod csv;
pub mod json;
pub mod text;

pub use csv::{CsvOutput, CsvOutputError};
pub use json::JsonOutput;
pub use text::TextOutput;
