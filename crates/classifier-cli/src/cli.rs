//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;
use classifier_core::{Prefix, StatsMode};

const AFTER_HELP: &str = "\
Output files:
    integers.txt    integer numbers
    floats.txt      decimal numbers
    strings.txt     everything else

Examples:
    data-classifier input.txt
    data-classifier -o /tmp -p result_ -a -f input1.txt input2.txt
    data-classifier -s data.txt";

/// Data classifier - split text files into integers, floats, and strings
#[derive(Parser, Debug, Clone)]
#[command(name = "data-classifier", author, version, about, long_about = None)]
#[command(after_help = AFTER_HELP)]
pub struct Args {
    /// Directory for output files (defaults to the current directory)
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        env = "DATA_CLASSIFIER_OUTPUT_DIR",
        value_parser = parse_output_dir
    )]
    pub output_dir: Option<PathBuf>,

    /// Prefix for output file names
    #[arg(
        short = 'p',
        long,
        value_name = "PREFIX",
        env = "DATA_CLASSIFIER_PREFIX",
        value_parser = parse_prefix
    )]
    pub prefix: Option<Prefix>,

    /// Append to existing output files instead of overwriting them
    #[arg(short = 'a', long)]
    pub append: bool,

    /// Short statistics (counts only)
    #[arg(short = 's', long, conflicts_with = "full_stats")]
    pub short_stats: bool,

    /// Full statistics (count, min, max, sum, average)
    #[arg(short = 'f', long)]
    pub full_stats: bool,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", env = "DATA_CLASSIFIER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Input files to classify
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,
}

impl Args {
    /// Statistics mode selected by flags, if any.
    pub fn stats_mode(&self) -> Option<StatsMode> {
        match (self.short_stats, self.full_stats) {
            (_, true) => Some(StatsMode::Full),
            (true, false) => Some(StatsMode::Simple),
            (false, false) => None,
        }
    }
}

fn reject_flag_like(raw: &str, what: &str) -> Result<(), String> {
    if raw.starts_with('-') {
        return Err(format!("option requires {what}, but got: {raw}"));
    }
    Ok(())
}

fn parse_output_dir(raw: &str) -> Result<PathBuf, String> {
    reject_flag_like(raw, "a path")?;
    if raw.trim().is_empty() {
        return Err("output directory must not be empty".to_string());
    }
    Ok(PathBuf::from(raw))
}

fn parse_prefix(raw: &str) -> Result<Prefix, String> {
    reject_flag_like(raw, "a prefix")?;
    Prefix::parse(raw).map_err(|e| e.to_string())
}
