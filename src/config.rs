//! Configuration for a tagging run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::layout::LayoutConfig;

/// Which processed documents get an entry in `tags.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagPolicy {
    /// Every processed document
    #[default]
    All,
    /// Only processed documents that kept their original name, i.e. the ones
    /// whose rules still need to be written
    UnmatchedOnly,
}

impl TagPolicy {
    /// Whether a processed document with the given rename outcome is recorded.
    pub fn records(&self, renamed: bool) -> bool {
        match self {
            Self::All => true,
            Self::UnmatchedOnly => !renamed,
        }
    }
}

/// Default number of concurrent processing units: half the available
/// hardware parallelism, rounded up.
pub fn default_threads() -> usize {
    let cpus = std::thread::available_parallelism().map_or(1, |n| n.get());
    ((cpus + 1) / 2).max(1)
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root of the tree to scan for PDF files.
    pub input_dir: PathBuf,

    /// Directory receiving copies/links, text files and the JSON reports.
    pub output_dir: PathBuf,

    /// Maximum number of documents processed concurrently.
    pub threads: usize,

    /// Only extract and rename files carrying a scanner timestamp name
    /// (`2021_03_03_10_11_12.pdf`); other files are copied unchanged.
    pub rename_new_only: bool,

    /// Write the recovered text of recorded documents next to them.
    pub write_text: bool,

    /// Symlink to the source instead of copying it.
    pub symlink: bool,

    /// Which documents are recorded in `tags.json`.
    pub tag_policy: TagPolicy,

    /// Extraction time above which a document is reported as slow.
    pub slow_document_threshold: Duration,

    /// Layout reconstruction settings.
    pub layout: LayoutConfig,
}

impl PipelineConfig {
    /// Create a configuration with defaults for everything but the two
    /// directories.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            threads: default_threads(),
            rename_new_only: true,
            write_text: false,
            symlink: false,
            tag_policy: TagPolicy::default(),
            slow_document_threshold: Duration::from_millis(500),
            layout: LayoutConfig::default(),
        }
    }

    /// Set the number of concurrent processing units.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Restrict renaming to scanner timestamp names.
    pub fn with_rename_new_only(mut self, enable: bool) -> Self {
        self.rename_new_only = enable;
        self
    }

    /// Write recovered text files.
    pub fn with_write_text(mut self, enable: bool) -> Self {
        self.write_text = enable;
        self
    }

    /// Symlink instead of copying.
    pub fn with_symlink(mut self, enable: bool) -> Self {
        self.symlink = enable;
        self
    }

    /// Set the tag record policy.
    pub fn with_tag_policy(mut self, policy: TagPolicy) -> Self {
        self.tag_policy = policy;
        self
    }

    /// Set the slow document threshold.
    pub fn with_slow_document_threshold(mut self, threshold: Duration) -> Self {
        self.slow_document_threshold = threshold;
        self
    }

    /// Set layout reconstruction settings.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Check the configuration before a run.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] when `threads` is zero, the input directory
    /// does not exist, or the output directory is the input directory.
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(Error::InvalidConfig("threads must be at least 1".to_string()));
        }
        if !self.input_dir.is_dir() {
            return Err(Error::InvalidConfig(format!(
                "input directory {} does not exist",
                self.input_dir.display()
            )));
        }
        if same_dir(&self.input_dir, &self.output_dir) {
            return Err(Error::InvalidConfig(format!(
                "output directory {} must differ from the input directory",
                self.output_dir.display()
            )));
        }
        Ok(())
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
