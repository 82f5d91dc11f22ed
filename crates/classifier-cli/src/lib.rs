//! # classifier-cli
//!
//! Command-line front end for the data classifier.
//!
//! This crate turns command-line arguments, environment variables, and an
//! optional TOML config file into a [`ProcessingConfig`] and runs it:
//! - [`cli`]: argument definitions
//! - [`config`]: config file loading and option precedence
//! - [`logging`]: tracing subscriber setup

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use classifier_core::{Classifier, ProcessingConfig, RunReport};

pub use cli::Args;
pub use error::{Error, Result};

/// Resolves the configuration for `args` and runs the classification.
pub fn run(args: &Args) -> Result<RunReport> {
    let file_config = config::FileConfig::load_for(args.config.as_deref())?;
    let processing: ProcessingConfig = config::build_processing_config(args, &file_config)?;
    Ok(Classifier::new(processing).run()?)
}

/// Process exit code for a successful run.
pub const EXIT_SUCCESS: u8 = 0;

/// Process exit code for usage errors, fatal errors, and runs with problems.
pub const EXIT_FAILURE: u8 = 1;

/// Outcome of parsing the command line.
#[derive(Debug)]
pub enum Invocation {
    /// Arguments are valid; run the classification.
    Run(Args),
    /// Print `message` and exit with `code` without running.
    Exit {
        /// Process exit code
        code: u8,
        /// Text to print (help, version, or a usage error)
        message: String,
        /// Whether `message` belongs on stderr rather than stdout
        to_stderr: bool,
    },
}

/// Parses `argv` (including the program name) into an [`Invocation`].
///
/// A bare invocation prints the long help to stdout and fails. Explicit
/// `--help` and `--version` succeed; any other parse error fails with the
/// message on stderr.
pub fn parse_invocation<I, T>(argv: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    if argv.len() <= 1 {
        return Invocation::Exit {
            code: EXIT_FAILURE,
            message: Args::command().render_long_help().to_string(),
            to_stderr: false,
        };
    }

    match Args::try_parse_from(argv) {
        Ok(args) => Invocation::Run(args),
        Err(e) => {
            let informational =
                matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion);
            Invocation::Exit {
                code: if informational { EXIT_SUCCESS } else { EXIT_FAILURE },
                message: e.render().to_string(),
                to_stderr: !informational,
            }
        }
    }
}

/// Maps the result of [`run`] to a process exit code.
pub fn exit_code(result: &Result<RunReport>) -> u8 {
    match result {
        Ok(report) if report.is_success() => EXIT_SUCCESS,
        Ok(_) | Err(_) => EXIT_FAILURE,
    }
}
