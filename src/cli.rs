//! Command-line interface definitions for dupfind.
//!
//! This module defines all CLI arguments using the clap derive API. List
//! arguments take comma-separated values and may also be repeated.
//!
//! # Example
//!
//! ```bash
//! # Scan two trees, skipping any directory named repos or node_modules
//! dupfind --search-dir-paths /Users/chuck/Documents,/Users/chuck/Desktop \
//!         --excluded-dir-names repos,node_modules
//!
//! # JSON output for scripting
//! dupfind -s ~/Downloads -o json
//!
//! # Keep going past unreadable entries
//! dupfind -s ~/Downloads --lenient
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Find duplicate files by SHA-256 content fingerprint.
///
/// Every regular, non-hidden file under the search directories is hashed;
/// files sharing a hash are reported together, one group per line.
#[derive(Debug, Parser)]
#[command(name = "dupfind")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Comma-separated directories to search (absolute or relative)
    #[arg(
        short = 's',
        long = "search-dir-paths",
        alias = "searchDirPaths",
        value_name = "PATHS",
        value_delimiter = ','
    )]
    pub search_dir_paths: Vec<PathBuf>,

    /// Comma-separated directory names to skip wherever they appear
    #[arg(
        short = 'x',
        long = "excluded-dir-names",
        alias = "excludedDirNames",
        value_name = "NAMES",
        value_delimiter = ','
    )]
    pub excluded_dir_names: Vec<String>,

    /// Output format for the duplicate report
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Skip unreadable entries with a warning instead of aborting the scan
    #[arg(long)]
    pub lenient: bool,

    /// Follow symbolic links during scan
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the effective configuration as TOML to PATH and exit
    #[arg(long, value_name = "PATH")]
    pub write_config: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and the report
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Hide the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Report errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line of `|`-separated paths per group
    #[default]
    Text,
    /// JSON output for scripting
    Json,
    /// CSV output for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
