//! Per-document processing.

use std::any::Any;
use std::collections::BTreeSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::classify::{NameRegistry, Renamer, RuleTable};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::layout::LayoutConfig;
use crate::source::GlyphSource;
use crate::text::{document_words, extract_document_text, normalize_first_date};

use super::output::{self, Placement};
use super::walk::is_scanner_name;
use super::{Document, DocumentState};

/// Processes one document at a time: extraction, classification, renaming and
/// placement in the output directory.
///
/// A unit only reads shared state, apart from name claims in the registry, so
/// one unit can serve every worker thread.
#[derive(Clone, Copy)]
pub struct ProcessingUnit<'a> {
    config: &'a PipelineConfig,
    rules: &'a RuleTable,
    registry: &'a NameRegistry,
    source: &'a dyn GlyphSource,
}

impl<'a> ProcessingUnit<'a> {
    /// Create a unit over the run's shared collaborators.
    pub fn new(
        config: &'a PipelineConfig,
        rules: &'a RuleTable,
        registry: &'a NameRegistry,
        source: &'a dyn GlyphSource,
    ) -> Self {
        Self {
            config,
            rules,
            registry,
            source,
        }
    }

    /// Run a dispatched document to completion.
    ///
    /// Never fails: decode errors, panics and output I/O errors are recorded on
    /// the returned document.
    pub fn process(&self, mut doc: Document) -> Document {
        if !self.config.rename_new_only || is_scanner_name(&doc.source_path) {
            self.analyze(&mut doc);
        } else {
            log::debug!("{}: not a scanner name, copying only", doc.source_path.display());
        }

        let placed = self.reserve_name(&doc).and_then(|()| self.write_outputs(&doc));
        if let Err(e) = placed {
            log::warn!("{}: output failed: {}", doc.source_path.display(), e);
            doc.fail(e.to_string());
        }

        if let Err(e) = doc.advance(DocumentState::Completed) {
            log::error!("{}", e);
        }
        doc
    }

    fn analyze(&self, doc: &mut Document) {
        doc.processed = true;

        let started = Instant::now();
        let extracted = catch_unwind(AssertUnwindSafe(|| {
            extract_document_text(self.source, &doc.source_path, &self.config.layout)
        }));
        let elapsed = started.elapsed();
        if elapsed > self.config.slow_document_threshold {
            log::info!("{}: slow document, {:?}", doc.source_path.display(), elapsed);
        }

        match extracted {
            Ok(Ok(text)) => doc.text = text,
            Ok(Err(e)) => {
                log::warn!("{}: {}", doc.source_path.display(), e);
                doc.fail(e.to_string());
            },
            Err(payload) => {
                let reason = format!("extraction panicked: {}", panic_message(payload.as_ref()));
                log::warn!("{}: {}", doc.source_path.display(), reason);
                doc.fail(reason);
            },
        }

        if doc.failure.is_none() {
            self.classify(doc);
        }
        doc.record_tags = self.config.tag_policy.records(doc.renamed);
    }

    fn classify(&self, doc: &mut Document) {
        doc.first_date = normalize_first_date(&doc.text);
        doc.words = document_words(&doc.text);
        doc.tags = self.rules.matched_keywords(&doc.text);

        let renamer = Renamer::new(self.rules, self.registry);
        let stem = doc.stem();
        let canonical = renamer.canonical_name(&stem, &doc.text, &doc.tags, &doc.first_date);
        if let Some(name) = canonical {
            log::debug!("{} -> {}", doc.source_path.display(), name);
            doc.rename_to(name);
        } else {
            log::debug!("{}: no matching rule, tags {:?}", doc.source_path.display(), doc.tags);
        }
    }

    /// Renamed documents already hold their name. A document keeping its
    /// original name claims it here, so it never replaces another output.
    fn reserve_name(&self, doc: &Document) -> Result<()> {
        if doc.renamed || self.registry.try_claim(&doc.base_name) {
            Ok(())
        } else {
            Err(Error::NameTaken {
                name: doc.base_name.clone(),
            })
        }
    }

    fn write_outputs(&self, doc: &Document) -> Result<()> {
        if self.config.write_text && doc.record_tags {
            output::write_text(&doc.text_destination, &doc.text)?;
        }

        let placement = if self.config.symlink {
            Placement::Symlink
        } else {
            Placement::Copy
        };
        placement.place(&doc.source_path, &doc.destination)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

/// Text, date and tags of one explicitly listed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The file
    pub path: PathBuf,
    /// Reconstructed text
    pub text: String,
    /// Normalized first date or empty
    pub first_date: String,
    /// Matched keywords (empty without a rule table)
    pub tags: BTreeSet<String>,
}

/// Extract a single file without renaming or writing anything.
///
/// # Errors
///
/// Propagates the source's decode error.
pub fn extract_file(
    source: &dyn GlyphSource,
    path: &Path,
    layout: &LayoutConfig,
    rules: Option<&RuleTable>,
) -> Result<Extraction> {
    let text = extract_document_text(source, path, layout)?;
    let first_date = normalize_first_date(&text);
    let tags = rules.map(|r| r.matched_keywords(&text)).unwrap_or_default();

    Ok(Extraction {
        path: path.to_path_buf(),
        text,
        first_date,
        tags,
    })
}
