//! Common test utilities for classifier integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use classifier_core::{Prefix, ProcessingConfig, StatsMode};
use tempfile::TempDir;

/// Temporary workspace with an input area and an output directory.
pub struct Workspace {
    /// Owns the temporary directory for the lifetime of the test
    pub dir: TempDir,
}

impl Workspace {
    /// Creates an empty workspace.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Writes an input file and returns its path.
    pub fn input(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("write input");
        path
    }

    /// Output directory used by [`Workspace::config`].
    pub fn out_dir(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    /// Reads an output file, or `None` if it was never created.
    pub fn output(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.out_dir().join(name)).ok()
    }

    /// Builds a configuration writing into [`Workspace::out_dir`].
    pub fn config(
        &self,
        inputs: &[PathBuf],
        prefix: Option<&str>,
        append: bool,
        mode: StatsMode,
    ) -> ProcessingConfig {
        let mut builder = ProcessingConfig::builder()
            .output_dir(self.out_dir())
            .append(append)
            .stats_mode(mode)
            .input_files(inputs.iter().cloned());
        if let Some(prefix) = prefix {
            builder = builder.prefix(Prefix::parse(prefix).expect("valid prefix"));
        }
        builder.build().expect("valid config")
    }

    /// Root path of the workspace.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
