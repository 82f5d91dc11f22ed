//! The classification run.
//!
//! [`Classifier::run`] validates the output directory, then reads every input
//! file in order. Problems with a single file or line are collected into the
//! [`RunReport`] and never abort the run; only an unusable output directory
//! is fatal.
//!
//! # Usage
//!
//! ```no_run
//! use classifier_core::{Classifier, ProcessingConfig, StatsMode};
//!
//! let config = ProcessingConfig::builder()
//!     .output_dir("/tmp/out")
//!     .stats_mode(StatsMode::Simple)
//!     .input_file("data.txt")
//!     .build()?;
//!
//! let report = Classifier::new(config).run()?;
//! println!("{report}");
//! # Ok::<(), classifier_core::Error>(())
//! ```

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::config::ProcessingConfig;
use crate::error::{Error, Result};
use crate::sink::OutputSinks;
use crate::stats::StatsSet;
use crate::token::ClassifiedLine;

/// Input files above this size are reported before being read (100 MiB).
pub const LARGE_FILE_BYTES: u64 = 100 * 1024 * 1024;

// ============================================================================
// Problems and outcome
// ============================================================================

/// A non-fatal problem recorded during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunProblem {
    /// An input file could not be processed.
    File {
        /// The input file
        path: PathBuf,
        /// What went wrong
        reason: String,
    },
    /// A single line could not be written out.
    Line {
        /// The input file
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// What went wrong
        reason: String,
    },
    /// An output file could not be flushed.
    Output {
        /// What went wrong
        reason: String,
    },
}

impl fmt::Display for RunProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path, reason } => write!(f, "{}: {reason}", path.display()),
            Self::Line { path, line, reason } => {
                write!(f, "line {line} in {}: {reason}", path.display())
            }
            Self::Output { reason } => write!(f, "output: {reason}"),
        }
    }
}

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every input file was processed.
    Success,
    /// Some input files failed, others were processed.
    PartialSuccess,
    /// No input file could be processed.
    Failed,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "Processing completed successfully"),
            Self::PartialSuccess => write!(f, "Processing completed with errors"),
            Self::Failed => write!(f, "Processing failed"),
        }
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Collected statistics.
    pub stats: StatsSet,
    /// Output files that were written, in output order.
    pub created: Vec<PathBuf>,
    /// Input files processed (including empty ones).
    pub processed: usize,
    /// Input files that failed.
    pub failed: usize,
    /// Input files given.
    pub total: usize,
    /// Non-fatal problems, in the order they occurred.
    pub problems: Vec<RunProblem>,
}

impl RunReport {
    /// Classifies the outcome by file counts.
    pub fn status(&self) -> RunStatus {
        if self.failed == 0 {
            RunStatus::Success
        } else if self.processed > 0 {
            RunStatus::PartialSuccess
        } else {
            RunStatus::Failed
        }
    }

    /// A run succeeds when nothing went wrong or at least one file was
    /// processed.
    pub fn is_success(&self) -> bool {
        self.problems.is_empty() || self.processed > 0
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// Runs one classification over the configured input files.
#[derive(Debug)]
pub struct Classifier {
    config: ProcessingConfig,
    stats: StatsSet,
    sinks: OutputSinks,
    problems: Vec<RunProblem>,
    processed: usize,
    failed: usize,
}

impl Classifier {
    /// Creates a classifier for `config`. Nothing is touched on disk yet.
    pub fn new(config: ProcessingConfig) -> Self {
        Self {
            stats: StatsSet::new(config.stats_mode()),
            sinks: OutputSinks::new(&config),
            config,
            problems: Vec::new(),
            processed: 0,
            failed: 0,
        }
    }

    /// Processes every input file and returns the report.
    ///
    /// Fails only if the output directory cannot be used.
    pub fn run(mut self) -> Result<RunReport> {
        prepare_output_dir(self.config.output_dir())?;

        tracing::info!(
            output_dir = %self.config.output_dir().display(),
            prefix = %self.config.prefix(),
            mode = if self.config.append() { "append" } else { "overwrite" },
            stats = %self.config.stats_mode(),
            "Processing input files"
        );

        let inputs = self.config.input_files().to_vec();
        for path in &inputs {
            self.process_file(path);
        }

        let summary = self.sinks.finish();
        self.problems.extend(summary.errors.into_iter().map(|e| RunProblem::Output {
            reason: e.to_string(),
        }));

        Ok(RunReport {
            stats: self.stats,
            created: summary.created,
            processed: self.processed,
            failed: self.failed,
            total: inputs.len(),
            problems: self.problems,
        })
    }

    fn process_file(&mut self, path: &Path) {
        tracing::info!(file = %path.display(), "Processing input file");

        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return self.fail_file(path, "file not found".to_string());
            }
            Err(e) => return self.fail_file(path, format!("cannot access file: {e}")),
        };

        if !metadata.is_file() {
            return self.fail_file(
                path,
                "not a regular file (possibly a directory)".to_string(),
            );
        }

        if metadata.len() == 0 {
            tracing::info!(file = %path.display(), "Input file is empty");
            self.processed += 1;
            return;
        }
        if metadata.len() > LARGE_FILE_BYTES {
            tracing::warn!(
                file = %path.display(),
                size = %format_bytes(metadata.len()),
                "Large input file"
            );
        }

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => return self.fail_file(path, format!("cannot open for reading: {e}")),
        };

        let mut lines_read = 0usize;
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    return self.fail_file(
                        path,
                        format!("read error after line {lines_read}: {e}"),
                    );
                }
            };
            lines_read = index + 1;
            self.process_line(path, lines_read, &line);
        }

        self.processed += 1;
        tracing::info!(file = %path.display(), lines = lines_read, "Input file processed");
    }

    fn process_line(&mut self, path: &Path, line_number: usize, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        let classified =
            ClassifiedLine::from_line(line, |kind, token| self.stats.record(kind, token));

        for (kind, group) in classified.groups() {
            if let Err(e) = self.sinks.write_line(kind, group) {
                tracing::error!(
                    file = %path.display(),
                    line = line_number,
                    kind = %kind,
                    error = %e,
                    "Failed to write output"
                );
                self.problems.push(RunProblem::Line {
                    path: path.to_path_buf(),
                    line: line_number,
                    reason: e.to_string(),
                });
            }
        }
    }

    fn fail_file(&mut self, path: &Path, reason: String) {
        tracing::error!(file = %path.display(), reason = %reason, "Input file failed");
        self.failed += 1;
        self.problems.push(RunProblem::File {
            path: path.to_path_buf(),
            reason,
        });
    }
}

/// Creates the output directory if needed and checks that it is usable.
fn prepare_output_dir(dir: &Path) -> Result<()> {
    match fs::metadata(dir) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(dir = %dir.display(), "Output directory does not exist, creating it");
            fs::create_dir_all(dir).map_err(|e| Error::io_with_path(e, dir))?;
            tracing::info!(dir = %dir.display(), "Output directory created");
        }
        Err(e) => return Err(Error::io_with_path(e, dir)),
        Ok(metadata) if !metadata.is_dir() => {
            return Err(Error::output_dir(dir, "exists but is not a directory"));
        }
        Ok(_) => {}
    }
    check_writable(dir)
}

/// Verifies that the current user can create files in `dir`.
///
/// Permission bits alone say nothing about the effective user, so a scratch
/// file is created and dropped instead.
fn check_writable(dir: &Path) -> Result<()> {
    match tempfile::tempfile_in(dir) {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::error!(dir = %dir.display(), error = %e, "Output directory is not writable");
            Err(Error::output_dir(dir, "is not writable"))
        }
    }
}

/// Formats a byte count with a binary unit.
fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    match bytes {
        b if b < KIB => format!("{b} B"),
        b if b < MIB => format!("{:.2} KB", b as f64 / KIB as f64),
        b if b < GIB => format!("{:.2} MB", b as f64 / MIB as f64),
        b => format!("{:.2} GB", b as f64 / GIB as f64),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::StatsMode;
    use crate::token::TokenKind;

    fn run_with(dir: &Path, inputs: &[PathBuf], mode: StatsMode) -> RunReport {
        let config = ProcessingConfig::builder()
            .output_dir(dir.join("out"))
            .stats_mode(mode)
            .input_files(inputs.iter().cloned())
            .build()
            .unwrap();
        Classifier::new(config).run().unwrap()
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.00 KB");
        assert_eq!(format_bytes(150 * 1024 * 1024), "150.00 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn test_run_creates_output_dir_and_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("in.txt");
        fs::write(&input, "1 hello 2.5\n\n   \n-7 world\n").unwrap();

        let report = run_with(dir.path(), &[input], StatsMode::Full);
        let out = dir.path().join("out");

        assert_eq!(
            fs::read_to_string(out.join("integers.txt")).unwrap(),
            "1\n-7\n"
        );
        assert_eq!(fs::read_to_string(out.join("floats.txt")).unwrap(), "2.5\n");
        assert_eq!(
            fs::read_to_string(out.join("strings.txt")).unwrap(),
            "hello\nworld\n"
        );
        assert_eq!(report.stats.count(TokenKind::Integer), 2);
        assert_eq!(report.stats.count(TokenKind::String), 2);
        assert_eq!(report.created.len(), 3);
        assert_eq!(report.status(), RunStatus::Success);
        assert!(report.is_success());
    }

    #[test]
    fn test_missing_input_is_recorded() {
        let dir = tempfile::TempDir::new().unwrap();
        let good = dir.path().join("good.txt");
        fs::write(&good, "42\n").unwrap();
        let missing = dir.path().join("missing.txt");

        let report = run_with(dir.path(), &[missing.clone(), good], StatsMode::None);

        assert_eq!(report.processed, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.total, 2);
        assert_eq!(report.status(), RunStatus::PartialSuccess);
        assert!(report.is_success());
        assert_eq!(
            report.problems,
            vec![RunProblem::File {
                path: missing,
                reason: "file not found".to_string()
            }]
        );
    }

    #[test]
    fn test_directory_input_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let report = run_with(dir.path(), &[dir.path().to_path_buf()], StatsMode::None);

        assert_eq!(report.failed, 1);
        assert_eq!(report.status(), RunStatus::Failed);
        assert!(!report.is_success());
        assert!(report.problems[0].to_string().contains("not a regular file"));
    }

    #[test]
    fn test_empty_input_counts_as_processed() {
        let dir = tempfile::TempDir::new().unwrap();
        let empty = dir.path().join("empty.txt");
        fs::write(&empty, "").unwrap();

        let report = run_with(dir.path(), &[empty], StatsMode::Simple);
        assert_eq!(report.processed, 1);
        assert!(report.created.is_empty());
        assert!(!dir.path().join("out").join("strings.txt").exists());
    }

    #[test]
    fn test_invalid_utf8_fails_file_but_keeps_earlier_lines() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("bad.txt");
        fs::write(&input, b"first line\n\xff\xfe\nthird\n").unwrap();

        let report = run_with(dir.path(), &[input], StatsMode::None);
        assert_eq!(report.failed, 1);
        assert_eq!(report.processed, 0);
        assert!(report.problems[0].to_string().contains("read error after line 1"));
        assert_eq!(
            fs::read_to_string(dir.path().join("out").join("strings.txt")).unwrap(),
            "first line\n"
        );
    }

    #[test]
    fn test_output_dir_that_is_a_file_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let not_dir = dir.path().join("file");
        fs::write(&not_dir, "x").unwrap();

        let config = ProcessingConfig::builder()
            .output_dir(&not_dir)
            .input_file("whatever.txt")
            .build()
            .unwrap();
        let err = Classifier::new(config).run().unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_multiple_inputs_are_processed_in_order() {
        let dir = tempfile::TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "1\n").unwrap();
        fs::write(&b, "2\n").unwrap();

        run_with(dir.path(), &[b, a], StatsMode::None);
        assert_eq!(
            fs::read_to_string(dir.path().join("out").join("integers.txt")).unwrap(),
            "2\n1\n"
        );
    }

    #[test]
    fn test_check_writable_rejects_non_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, "x").unwrap();

        let err = check_writable(&file).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Output directory {}: is not writable", file.display())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_unwritable_output_dir_is_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        // Privileged users ignore permission bits; nothing to check then.
        if tempfile::tempfile_in(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let input = dir.path().join("in.txt");
        fs::write(&input, "1 a\n").unwrap();
        let config = ProcessingConfig::builder()
            .output_dir(&locked)
            .input_file(&input)
            .build()
            .unwrap();
        let result = Classifier::new(config).run();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("is not writable"));
    }

    #[test]
    fn test_write_failure_is_recorded_and_processing_continues() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("out");
        fs::create_dir_all(out.join("integers.txt")).unwrap();
        let input = dir.path().join("in.txt");
        fs::write(&input, "1 a\n2 b\n").unwrap();

        let report = run_with(dir.path(), &[input.clone()], StatsMode::Simple);

        let failed_lines: Vec<usize> = report
            .problems
            .iter()
            .map(|problem| match problem {
                RunProblem::Line { path, line, reason } => {
                    assert_eq!(path, &input);
                    assert!(reason.contains("integers.txt"));
                    *line
                }
                other => unreachable!("unexpected problem: {other}"),
            })
            .collect();
        assert_eq!(failed_lines, vec![1, 2]);
        assert_eq!(fs::read_to_string(out.join("strings.txt")).unwrap(), "a\nb\n");
        assert_eq!(report.created, vec![out.join("strings.txt")]);
        assert_eq!(report.processed, 1);
        assert_eq!(report.stats.count(TokenKind::Integer), 2);
        assert!(report.is_success());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_flush_failure_is_reported_as_output_problem() {
        let dev_full = Path::new("/dev/full");
        if !dev_full.exists() {
            return;
        }
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("out");
        fs::create_dir_all(&out).unwrap();
        std::os::unix::fs::symlink(dev_full, out.join("integers.txt")).unwrap();
        let input = dir.path().join("in.txt");
        fs::write(&input, "42\n").unwrap();

        let report = run_with(dir.path(), &[input], StatsMode::None);

        assert_eq!(report.problems.len(), 1);
        let RunProblem::Output { reason } = &report.problems[0] else {
            unreachable!("expected an output problem");
        };
        assert!(reason.contains("integers.txt"));
        assert_eq!(report.processed, 1);
        assert_eq!(report.status(), RunStatus::Success);
        assert!(report.is_success());
        assert!(report.to_string().contains(" 1. output: "));
    }

    #[test]
    fn test_problem_display() {
        let problem = RunProblem::Line {
            path: PathBuf::from("in.txt"),
            line: 3,
            reason: "disk full".to_string(),
        };
        assert_eq!(problem.to_string(), "line 3 in in.txt: disk full");
    }
}
