//! Error types for classifier-cli

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for classifier-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in classifier-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from classifier-core
    #[error(transparent)]
    Core(#[from] classifier_core::Error),

    /// The config file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("Failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },

    /// An explicitly requested config file does not exist.
    #[error("Config file does not exist: {}", .0.display())]
    ConfigMissing(PathBuf),
}

impl Error {
    /// Returns whether the user can fix this by changing options or the
    /// config file, as opposed to a failure of the environment.
    pub fn is_usage_error(&self) -> bool {
        match self {
            Error::Core(e) => e.is_usage_error(),
            Error::ConfigParse { .. } | Error::ConfigMissing(_) => true,
            Error::ConfigRead { .. } => false,
        }
    }
}
