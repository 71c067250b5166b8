//! Run-wide aggregates, owned by the coordinator.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::text::WordFrequency;

use super::{Document, TagRecord};

/// A document that could not be fully processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    /// Source path
    pub path: PathBuf,
    /// What went wrong
    pub reason: String,
}

/// Accumulates completed documents. Only the coordinator thread touches it.
#[derive(Debug, Default)]
pub struct Aggregates {
    tags: BTreeMap<String, TagRecord>,
    words: WordFrequency,
    failures: Vec<DocumentFailure>,
    processed: usize,
    renamed: usize,
    merged: usize,
}

impl Aggregates {
    /// Create empty aggregates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a completed document into the aggregates.
    ///
    /// Words are counted only for successfully processed documents that kept
    /// their original name, so the report surfaces candidate keywords for
    /// new rules.
    pub fn merge(&mut self, doc: &Document) {
        self.merged += 1;
        if doc.processed {
            self.processed += 1;
        }
        if doc.renamed {
            self.renamed += 1;
        }
        if doc.record_tags {
            self.tags.insert(doc.file_name(), doc.record());
        }
        if doc.processed && !doc.renamed && doc.failure.is_none() {
            self.words.add_document(&doc.words);
        }
        if let Some(reason) = &doc.failure {
            self.failures.push(DocumentFailure {
                path: doc.source_path.clone(),
                reason: reason.clone(),
            });
        }
    }

    /// Number of documents merged so far.
    pub fn merged(&self) -> usize {
        self.merged
    }

    /// Finish the run.
    pub fn into_report(self, discovered: usize) -> RunReport {
        let mut failures = self.failures;
        failures.sort_by(|a, b| a.path.cmp(&b.path));

        RunReport {
            tags: self.tags,
            words: self.words.pruned(),
            discovered,
            processed: self.processed,
            renamed: self.renamed,
            failures,
        }
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Tag records keyed by original file name
    pub tags: BTreeMap<String, TagRecord>,
    /// Pruned word frequencies
    pub words: BTreeMap<String, u64>,
    /// PDF files found by the walk
    pub discovered: usize,
    /// Documents that went through extraction
    pub processed: usize,
    /// Documents given a canonical name
    pub renamed: usize,
    /// Per-document failures, sorted by path
    pub failures: Vec<DocumentFailure>,
}

impl RunReport {
    /// True if no document failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
