//! Application configuration management.
//!
//! Settings are layered with figment, lowest to highest priority:
//!
//! 1. Built-in defaults
//! 2. TOML config file (`--config PATH`, else `config.toml` in the platform
//!    config directory; a missing default file is ignored)
//! 3. Environment variables prefixed with `DUPFIND_`
//!    (e.g. `DUPFIND_EXCLUDED_DIR_NAMES='["node_modules","target"]'`)
//! 4. Command-line flags
//!
//! # Example config file
//!
//! ```toml
//! search_dir_paths = ["/home/user/Documents", "/home/user/Desktop"]
//! excluded_dir_names = ["repos", "node_modules"]
//! follow_symlinks = false
//! strict = true
//! buffer_size = 65536
//! output = "text"
//! ```

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, OutputFormat};
use crate::scanner::DEFAULT_BUFFER_SIZE;

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "DUPFIND_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directories to search, in order.
    pub search_dir_paths: Vec<PathBuf>,
    /// Directory names skipped wherever they appear.
    pub excluded_dir_names: Vec<String>,
    /// Follow symbolic links while walking.
    pub follow_symlinks: bool,
    /// Abort on the first walk or hash error.
    pub strict: bool,
    /// Hashing read buffer size in bytes.
    pub buffer_size: usize,
    /// Report format.
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_dir_paths: Vec::new(),
            excluded_dir_names: Vec::new(),
            follow_symlinks: false,
            strict: true,
            buffer_size: DEFAULT_BUFFER_SIZE,
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Build the layered figment without CLI overrides.
    ///
    /// `path` replaces the default platform config file when given.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(file) = path.map(Path::to_path_buf).or_else(Self::default_path) {
            figment = figment.merge(Toml::file(file));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load defaults, config file and environment.
    ///
    /// # Errors
    ///
    /// Fails if an explicitly requested file is missing or any layer holds
    /// an invalid value.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
        }

        let config: Self = Self::figment(path)
            .extract()
            .context("Failed to load configuration")?;
        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Apply command-line flags on top of the loaded configuration.
    ///
    /// List flags replace the configured lists when non-empty; boolean flags
    /// only ever switch behavior on.
    #[must_use]
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        if !cli.search_dir_paths.is_empty() {
            self.search_dir_paths = cli.search_dir_paths.clone();
        }
        if !cli.excluded_dir_names.is_empty() {
            self.excluded_dir_names = cli.excluded_dir_names.clone();
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
        if cli.lenient {
            self.strict = false;
        }
        if cli.follow_symlinks {
            self.follow_symlinks = true;
        }
        self
    }

    /// Save the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Fails if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write configuration to {}", path.display()))?;
        Ok(())
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "dupfind", "dupfind")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
