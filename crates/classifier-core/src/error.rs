//! Error types for the classifier core library.

use std::path::{Path, PathBuf};

/// Errors that can occur while configuring or running a classification.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration error (missing inputs, bad option values, etc.)
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// The output file prefix was rejected.
    #[error("Invalid prefix: {message}")]
    InvalidPrefix {
        /// Why the prefix was rejected
        message: String,
    },

    /// The output directory cannot be used.
    #[error("Output directory {}: {message}", path.display())]
    OutputDir {
        /// The offending directory
        path: PathBuf,
        /// What is wrong with it
        message: String,
    },

    /// I/O error tied to a specific path.
    #[error("I/O error at {}: {source}", path.display())]
    IoPath {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Convenience `Result` type alias for classifier operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new prefix validation error.
    pub fn invalid_prefix<S: Into<String>>(message: S) -> Self {
        Error::InvalidPrefix {
            message: message.into(),
        }
    }

    /// Creates a new output directory error.
    pub fn output_dir<P, S>(path: P, message: S) -> Self
    where
        P: AsRef<Path>,
        S: Into<String>,
    {
        Error::OutputDir {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path that caused it.
    pub fn io_with_path<P: AsRef<Path>>(source: std::io::Error, path: P) -> Self {
        Error::IoPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns whether this error came from the user's input rather than the
    /// environment.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Error::Config { .. } | Error::InvalidPrefix { .. })
    }
}
