//! Bounded-concurrency batch pipeline.
//!
//! The [`Coordinator`] walks the input tree, dispatches each PDF to a
//! [`ProcessingUnit`] on a worker pool and merges finished documents into the
//! run aggregates. At most `threads` documents are in flight: dispatching needs
//! a token from a [`TokenPool`], and a unit returns its token together with the
//! finished document. Withdrawing a token is the coordinator's only blocking
//! point.
//!
//! ```text
//! walk ──► withdraw token ──► merge previous result ──► spawn unit
//!                 ▲                                          │
//!                 └──────── Completed(document) ◄────────────┘
//! ```

pub mod aggregate;
pub mod document;
pub mod output;
pub mod tokens;
pub mod unit;
pub mod walk;

pub use aggregate::{Aggregates, DocumentFailure, RunReport};
pub use document::{Document, DocumentState, TagRecord};
pub use output::{write_reports, Placement, TAGS_FILE, WORDS_FILE};
pub use tokens::{Slot, TokenPool, TokenReturn};
pub use unit::{extract_file, Extraction, ProcessingUnit};
pub use walk::{discover, is_scanner_name, pdf_files};

use std::fs;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use crate::classify::{NameRegistry, RuleTable};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::source::GlyphSource;

/// Drives a tagging run.
pub struct Coordinator {
    config: PipelineConfig,
    rules: RuleTable,
    registry: NameRegistry,
    source: Box<dyn GlyphSource>,
}

impl Coordinator {
    /// Create a coordinator.
    ///
    /// `registry` should already hold the names present in the output
    /// directory (see [`NameRegistry::seed_from_dir`]).
    pub fn new<S>(
        config: PipelineConfig,
        rules: RuleTable,
        registry: NameRegistry,
        source: S,
    ) -> Self
    where
        S: GlyphSource + 'static,
    {
        Self {
            config,
            rules,
            registry,
            source: Box::new(source),
        }
    }

    /// The run configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The shared name registry.
    pub fn registry(&self) -> &NameRegistry {
        &self.registry
    }

    /// Process every PDF under the input directory and write the reports.
    ///
    /// # Errors
    ///
    /// Invalid configuration, a failing walk, a lost worker or failing to
    /// write the reports abort the run. Per-document problems do not; they
    /// are listed in [`RunReport::failures`].
    pub fn run(&self) -> Result<RunReport> {
        self.config.validate()?;
        fs::create_dir_all(&self.config.output_dir)?;

        let threads = self.config.threads;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("pdftag-worker-{}", i))
            .build()?;
        let tokens = TokenPool::new(threads)?;
        let unit =
            ProcessingUnit::new(&self.config, &self.rules, &self.registry, self.source.as_ref());

        log::info!(
            "Scanning {} with {} workers, {} rules",
            self.config.input_dir.display(),
            threads,
            self.rules.len()
        );
        let started = Instant::now();
        let mut aggregates = Aggregates::new();
        let mut discovered = 0;

        pool.in_place_scope(|scope| -> Result<()> {
            for path in walk::pdf_files(&self.config.input_dir, &self.config.output_dir) {
                let mut doc = Document::discovered(path?, &self.config.output_dir);
                discovered += 1;

                if let Slot::Completed(done) = tokens.withdraw()? {
                    merge(&mut aggregates, *done)?;
                }

                doc.advance(DocumentState::Dispatched)?;
                let returner = tokens.returner();
                scope.spawn(move |_| returner.complete(dispatch(unit, doc)));
            }

            for done in tokens.drain()? {
                merge(&mut aggregates, done)?;
            }
            Ok(())
        })?;

        let report = aggregates.into_report(discovered);
        write_reports(&self.config.output_dir, &report.tags, &report.words)?;

        log::info!(
            "Done in {:.2?}: {} found, {} processed, {} renamed, {} failed",
            started.elapsed(),
            report.discovered,
            report.processed,
            report.renamed,
            report.failures.len()
        );
        Ok(report)
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("config", &self.config)
            .field("rules", &self.rules.len())
            .field("registry", &self.registry.len())
            .finish_non_exhaustive()
    }
}

/// Run a unit, turning a panic outside extraction into a failed document so
/// the token always comes back.
fn dispatch(unit: ProcessingUnit<'_>, doc: Document) -> Document {
    let path = doc.source_path.clone();
    let output_dir = doc.destination.parent().map(|p| p.to_path_buf()).unwrap_or_default();

    catch_unwind(AssertUnwindSafe(|| unit.process(doc))).unwrap_or_else(|_| {
        log::error!("{}: processing panicked", path.display());
        let mut failed = Document::discovered(path, &output_dir);
        failed.fail("processing panicked");
        failed
    })
}

fn merge(aggregates: &mut Aggregates, mut doc: Document) -> Result<()> {
    doc.advance(DocumentState::Merged)?;
    aggregates.merge(&doc);
    Ok(())
}
