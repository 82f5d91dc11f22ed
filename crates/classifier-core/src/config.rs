//! Processing configuration.
//!
//! [`ProcessingConfig`] is the immutable description of one classification
//! run: where the output goes, how the output files are named, whether they
//! are appended to, which statistics are gathered, and which files are read.
//! It is assembled through [`ProcessingConfigBuilder`].
//!
//! # Example
//!
//! ```
//! use classifier_core::{Prefix, ProcessingConfig, StatsMode, TokenKind};
//!
//! let config = ProcessingConfig::builder()
//!     .output_dir("/tmp/out")
//!     .prefix(Prefix::parse("result_").unwrap())
//!     .stats_mode(StatsMode::Full)
//!     .input_file("in1.txt")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     config.output_path(TokenKind::Integer),
//!     std::path::Path::new("/tmp/out/result_integers.txt")
//! );
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::token::TokenKind;

/// Characters that may not appear anywhere in a prefix.
pub const FORBIDDEN_PREFIX_CHARS: &str = "<>:\"|?*&;$";

/// Maximum prefix length in characters, after trimming.
pub const MAX_PREFIX_LEN: usize = 100;

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

// ============================================================================
// StatsMode
// ============================================================================

/// Which statistics are gathered and reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsMode {
    /// No statistics section in the report.
    #[default]
    None,
    /// Counts only.
    Simple,
    /// Counts plus min, max, sum, and average (lengths for strings).
    Full,
}

impl StatsMode {
    /// Returns `true` if min/max/sum tracking is required.
    pub fn is_full(self) -> bool {
        matches!(self, Self::Full)
    }
}

impl fmt::Display for StatsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Simple => write!(f, "simple"),
            Self::Full => write!(f, "full"),
        }
    }
}

impl FromStr for StatsMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "simple" => Ok(Self::Simple),
            "full" => Ok(Self::Full),
            other => Err(Error::config(format!(
                "unknown stats mode '{other}' (expected none, simple, or full)"
            ))),
        }
    }
}

// ============================================================================
// Prefix
// ============================================================================

/// A validated output file name prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Prefix(String);

impl Prefix {
    /// Validates a raw prefix.
    ///
    /// Leading and trailing whitespace is stripped. The prefix is rejected
    /// if it is blank, contains path components (`/`, `\`, `..`), contains
    /// any of [`FORBIDDEN_PREFIX_CHARS`], or is longer than
    /// [`MAX_PREFIX_LEN`] characters.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_prefix("prefix must not be empty"));
        }

        if raw.contains('/') || raw.contains('\\') || raw.contains("..") {
            return Err(Error::invalid_prefix(
                "prefix must not contain path characters (/ \\ ..)",
            ));
        }

        let offending: Vec<String> = FORBIDDEN_PREFIX_CHARS
            .chars()
            .filter(|c| raw.contains(*c))
            .map(|c| format!("\"{c}\""))
            .collect();
        if !offending.is_empty() {
            return Err(Error::invalid_prefix(format!(
                "prefix contains forbidden characters: {}",
                offending.join(", ")
            )));
        }

        if trimmed.len() != raw.len() {
            tracing::warn!(prefix = %trimmed, "Stripped surrounding whitespace from prefix");
        }

        if trimmed.chars().count() > MAX_PREFIX_LEN {
            return Err(Error::invalid_prefix(format!(
                "prefix is longer than {MAX_PREFIX_LEN} characters"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the prefix as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if no prefix is applied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Prefix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// ============================================================================
// ProcessingConfig
// ============================================================================

/// Immutable configuration of a classification run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingConfig {
    output_dir: PathBuf,
    prefix: Prefix,
    append: bool,
    stats_mode: StatsMode,
    input_files: Vec<PathBuf>,
}

impl ProcessingConfig {
    /// Starts building a configuration.
    pub fn builder() -> ProcessingConfigBuilder {
        ProcessingConfigBuilder::default()
    }

    /// Directory the output files are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Prefix prepended to every output file name.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    /// Whether existing output files are appended to instead of truncated.
    pub fn append(&self) -> bool {
        self.append
    }

    /// Requested statistics mode.
    pub fn stats_mode(&self) -> StatsMode {
        self.stats_mode
    }

    /// Input files, in processing order.
    pub fn input_files(&self) -> &[PathBuf] {
        &self.input_files
    }

    /// Full path of the output file for `kind`.
    pub fn output_path(&self, kind: TokenKind) -> PathBuf {
        self.output_dir.join(format!("{}{}", self.prefix, kind.file_name()))
    }
}

/// Builder for [`ProcessingConfig`].
#[derive(Debug, Clone, Default)]
pub struct ProcessingConfigBuilder {
    output_dir: Option<PathBuf>,
    prefix: Prefix,
    append: bool,
    stats_mode: StatsMode,
    input_files: Vec<PathBuf>,
}

impl ProcessingConfigBuilder {
    /// Sets the output directory (defaults to the current directory).
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Sets the output file prefix.
    pub fn prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = prefix;
        self
    }

    /// Enables or disables append mode.
    pub fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Sets the statistics mode.
    pub fn stats_mode(mut self, mode: StatsMode) -> Self {
        self.stats_mode = mode;
        self
    }

    /// Adds one input file.
    pub fn input_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_files.push(path.into());
        self
    }

    /// Adds several input files, preserving their order.
    pub fn input_files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.input_files.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Finalizes the configuration.
    ///
    /// Fails when no input file was given.
    pub fn build(self) -> Result<ProcessingConfig> {
        if self.input_files.is_empty() {
            return Err(Error::config("at least one input file is required"));
        }

        Ok(ProcessingConfig {
            output_dir: self
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            prefix: self.prefix,
            append: self.append,
            stats_mode: self.stats_mode,
            input_files: self.input_files,
        })
    }
}
