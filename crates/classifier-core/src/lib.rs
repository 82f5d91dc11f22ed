#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Classifier Core Library
//!
//! Reads text files, classifies every whitespace-separated token as an
//! integer, a float, or a string, and writes each class to its own file.
//!
//! # Modules
//!
//! - [`config`]: Processing configuration and prefix validation
//! - [`token`]: Token classification
//! - [`stats`]: Per-kind statistics collectors
//! - [`sink`]: Lazily opened output files
//! - [`processor`]: The classification run and its report
//! - [`error`]: Error types and Result alias

pub mod config;
pub mod error;
pub mod processor;
mod report;
pub mod sink;
pub mod stats;
pub mod token;

// Re-exports for convenience
pub use config::{Prefix, ProcessingConfig, ProcessingConfigBuilder, StatsMode};
pub use error::{Error, Result};
pub use processor::{Classifier, RunProblem, RunReport, RunStatus};
pub use stats::{Statistics, StatsSet};
pub use token::{TokenKind, classify};
