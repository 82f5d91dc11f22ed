//! Config file loading and option precedence.
//!
//! Options are resolved in this order, first match wins:
//! 1. command-line flag
//! 2. environment variable (handled by clap)
//! 3. TOML config file
//! 4. built-in default
//!
//! The config file is `--config <FILE>` (or `DATA_CLASSIFIER_CONFIG`) when
//! given, otherwise `data-classifier/config.toml` under the platform config
//! directory if it exists.
//!
//! ```toml
//! output_dir = "/var/lib/classifier"
//! prefix = "nightly_"
//! append = true
//! stats = "full"
//! ```

use std::path::{Path, PathBuf};

use classifier_core::{Prefix, ProcessingConfig, StatsMode};
use serde::Deserialize;

use crate::cli::Args;
use crate::error::{Error, Result};

/// Project name used for the config directory.
pub const PROJECT_NAME: &str = "data-classifier";

/// Config file name inside the project config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Contents of the optional TOML config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Output directory
    pub output_dir: Option<PathBuf>,
    /// Output file prefix (validated like `--prefix`)
    pub prefix: Option<String>,
    /// Append mode
    pub append: Option<bool>,
    /// Statistics mode
    pub stats: Option<StatsMode>,
}

impl FileConfig {
    /// Default config file location for this platform.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parses config file contents.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads and parses the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content, path)?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Loads the explicit config file, or the default one if it exists.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file yields an empty config.
    pub fn load_for(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) if !path.exists() => Err(Error::ConfigMissing(path.to_path_buf())),
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load(&path),
                _ => Ok(Self::default()),
            },
        }
    }
}

/// Merges flags and the config file into a [`ProcessingConfig`].
pub fn build_processing_config(args: &Args, file: &FileConfig) -> Result<ProcessingConfig> {
    let mut builder = ProcessingConfig::builder()
        .append(args.append || file.append.unwrap_or(false))
        .stats_mode(args.stats_mode().or(file.stats).unwrap_or(StatsMode::None))
        .input_files(args.inputs.iter().cloned());

    match (&args.output_dir, &file.output_dir) {
        (Some(dir), _) => builder = builder.output_dir(dir),
        (None, Some(dir)) if dir.as_os_str().is_empty() => {
            return Err(classifier_core::Error::config("output_dir must not be empty").into());
        }
        (None, Some(dir)) => builder = builder.output_dir(dir),
        (None, None) => {}
    }

    match (&args.prefix, &file.prefix) {
        (Some(prefix), _) => builder = builder.prefix(prefix.clone()),
        (None, Some(raw)) => builder = builder.prefix(Prefix::parse(raw)?),
        (None, None) => {}
    }

    Ok(builder.build()?)
}
