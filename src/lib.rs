//! dupfind - Duplicate File Finder
//!
//! Walks one or more directory trees, fingerprints every regular, non-hidden
//! file with SHA-256 and reports the files whose contents are identical.
//! Directories whose name is on the exclusion list are skipped wherever they
//! appear.
//!
//! # Library use
//!
//! ```no_run
//! use dupfind::duplicates::{DuplicateFinder, FinderConfig};
//! use dupfind::scanner::ExclusionSet;
//! use std::path::PathBuf;
//!
//! let config = FinderConfig::default().with_exclusions(ExclusionSet::new(["node_modules"]));
//! let finder = DuplicateFinder::new(config);
//! let (groups, summary) = finder
//!     .find_duplicates_in_paths(vec![PathBuf::from("/home/user/Documents")])
//!     .unwrap();
//!
//! for group in &groups {
//!     println!("{} copies of {}", group.len(), group.hash_hex());
//! }
//! println!("{} reclaimable", summary.reclaimable_display());
//! ```

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, FinderConfig};
use crate::error::ExitCode;
use crate::output::{CsvOutput, JsonOutput, TextOutput};
use crate::progress::Progress;
use crate::scanner::{ExclusionSet, WalkerConfig};

/// Run the command-line application.
///
/// Returns the exit code for a completed run. Errors that stop the run
/// (bad configuration, missing roots, a strict scan hitting an unreadable
/// entry) are returned as `Err` and map to [`ExitCode::GeneralError`].
///
/// # Errors
///
/// Returns an error if configuration fails, a root is invalid, the scan
/// aborts, or the report cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let color = color_enabled(cli.no_color, io::stdout().is_terminal());
    if !color {
        yansi::disable();
    }

    let config = Config::load(cli.config.as_deref())?.with_cli_overrides(&cli);

    if let Some(ref path) = cli.write_config {
        config.save(path)?;
        log::info!("Configuration written to {}", path.display());
        return Ok(ExitCode::Success);
    }

    let roots = absolute_roots(&config.search_dir_paths)?;
    if roots.is_empty() {
        anyhow::bail!("--search-dir-paths is required and not provided");
    }

    let walker_config = WalkerConfig::new(
        ExclusionSet::new(&config.excluded_dir_names),
        config.follow_symlinks,
    );
    let mut finder_config = FinderConfig::default()
        .with_walker_config(walker_config)
        .with_strict(config.strict)
        .with_buffer_size(config.buffer_size);

    // The spinner shares stderr with the logger; only the text report is
    // meant for a human watching the terminal.
    if config.output == OutputFormat::Text && !cli.quiet && !cli.no_progress {
        finder_config = finder_config.with_progress_callback(Arc::new(Progress::new(false)));
    }

    let finder = DuplicateFinder::new(finder_config);
    let (groups, summary) = finder
        .find_duplicates_in_paths(roots)
        .context("Scan failed")?;

    let exit_code = ExitCode::from_scan(&groups, &summary);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match config.output {
        OutputFormat::Text => TextOutput::new(&groups)
            .with_color(color)
            .write_to(&mut handle)
            .context("Failed to write report")?,
        OutputFormat::Json => JsonOutput::new(&groups, &summary, exit_code)
            .write_to(&mut handle, true)
            .context("Failed to write JSON report")?,
        OutputFormat::Csv => CsvOutput::new(&groups)
            .write_to(&mut handle)
            .context("Failed to write CSV report")?,
    }
    handle.flush().context("Failed to flush stdout")?;

    if summary.has_errors() {
        log::warn!(
            "{} entries could not be read and were skipped",
            summary.errors.len()
        );
    }

    Ok(exit_code)
}

/// Styling is for a human at a terminal; redirected reports stay plain.
fn color_enabled(no_color: bool, stdout_is_terminal: bool) -> bool {
    !no_color && stdout_is_terminal
}

/// Resolve relative roots against the current directory.
fn absolute_roots(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    paths
        .iter()
        .map(|path| {
            std::path::absolute(path)
                .with_context(|| format!("Failed to resolve {}", path.display()))
        })
        .collect()
}
