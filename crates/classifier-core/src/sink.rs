//! Lazily opened output files, one per [`TokenKind`].

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::ProcessingConfig;
use crate::error::{Error, Result};
use crate::token::TokenKind;

/// Output writers for one run.
///
/// A file is created on the first write for its kind, so a run that sees no
/// floats leaves no `floats.txt` behind.
#[derive(Debug)]
pub struct OutputSinks {
    paths: [PathBuf; 3],
    append: bool,
    writers: [Option<BufWriter<File>>; 3],
}

/// What [`OutputSinks::finish`] produced.
#[derive(Debug, Default)]
pub struct SinkSummary {
    /// Files that were opened during the run, in output order.
    pub created: Vec<PathBuf>,
    /// Flush failures encountered while closing.
    pub errors: Vec<Error>,
}

impl OutputSinks {
    /// Prepares writers for the paths described by `config`.
    pub fn new(config: &ProcessingConfig) -> Self {
        Self {
            paths: TokenKind::ALL.map(|kind| config.output_path(kind)),
            append: config.append(),
            writers: [None, None, None],
        }
    }

    /// Returns `true` once the file for `kind` has been opened.
    pub fn is_open(&self, kind: TokenKind) -> bool {
        self.writers[kind.index()].is_some()
    }

    /// Writes `line` plus a newline to the file for `kind`.
    pub fn write_line(&mut self, kind: TokenKind, line: &str) -> Result<()> {
        let path = &self.paths[kind.index()];
        let slot = &mut self.writers[kind.index()];
        let writer = match slot {
            Some(writer) => writer,
            None => slot.insert(open(path, self.append)?),
        };
        writeln!(writer, "{line}").map_err(|e| Error::io_with_path(e, path))
    }

    /// Flushes and closes every open writer.
    pub fn finish(self) -> SinkSummary {
        let mut summary = SinkSummary::default();
        for (path, writer) in self.paths.into_iter().zip(self.writers) {
            let Some(mut writer) = writer else {
                continue;
            };
            if let Err(e) = writer.flush() {
                tracing::error!(path = %path.display(), error = %e, "Failed to flush output file");
                summary.errors.push(Error::io_with_path(e, &path));
            }
            summary.created.push(path);
        }
        summary
    }
}

fn open(path: &Path, append: bool) -> Result<BufWriter<File>> {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    let file = options.open(path).map_err(|e| Error::io_with_path(e, path))?;
    tracing::debug!(path = %path.display(), append, "Opened output file");
    Ok(BufWriter::new(file))
}
