//! Data Classifier CLI
//!
//! Splits text files into integers, floats, and strings.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::io::{self, Write};
use std::process::ExitCode;

use classifier_cli::{Invocation, exit_code, logging, parse_invocation};

fn main() -> ExitCode {
    let args = match parse_invocation(std::env::args_os()) {
        Invocation::Run(args) => args,
        Invocation::Exit {
            code,
            message,
            to_stderr,
        } => {
            let written = if to_stderr {
                write!(io::stderr().lock(), "{message}")
            } else {
                write!(io::stdout().lock(), "{message}")
            };
            return match written {
                Ok(()) => ExitCode::from(code),
                Err(_) => ExitCode::FAILURE,
            };
        }
    };

    logging::init(args.verbose);

    let result = classifier_cli::run(&args);
    let code = exit_code(&result);
    match result {
        Ok(report) => {
            if let Err(e) = writeln!(io::stdout().lock(), "{report}") {
                tracing::error!(error = %e, "Failed to write report");
                return ExitCode::FAILURE;
            }
        }
        Err(e) => {
            let hint = e.is_usage_error();
            let e = anyhow::Error::new(e).context("Classification failed");
            tracing::error!("{e:#}");
            eprintln!("Error: {e:#}");
            if hint {
                eprintln!("Run `data-classifier --help` for usage.");
            }
        }
    }
    ExitCode::from(code)
}
