//! The unit of work and its result record.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lifecycle of a document inside the pipeline.
///
/// States only move forward:
/// `Discovered → Dispatched → Completed → Merged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocumentState {
    /// Found by the walk
    Discovered,
    /// Handed to a processing unit
    Dispatched,
    /// Processing unit finished
    Completed,
    /// Folded into the run aggregates
    Merged,
}

/// A document travelling through the pipeline.
///
/// Mutated only by the processing unit that owns it; immutable once returned
/// to the coordinator.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path of the source file as discovered
    pub source_path: PathBuf,
    /// Reconstructed text (empty if none could be recovered)
    pub text: String,
    /// Matched keyword tokens
    pub tags: BTreeSet<String>,
    /// Normalized first date (`-YYYY-Mon-D`) or empty
    pub first_date: String,
    /// Distinct words of the text
    pub words: Vec<String>,
    /// Output base name (canonical name when renamed, original stem otherwise)
    pub base_name: String,
    /// Whether a canonical name was assigned
    pub renamed: bool,
    /// Destination of the copy or link
    pub destination: PathBuf,
    /// Destination of the extracted text
    pub text_destination: PathBuf,
    /// Whether text was extracted and classified (false for copy-only files)
    pub processed: bool,
    /// Whether the document goes into `tags.json`
    pub record_tags: bool,
    /// What went wrong, if anything
    pub failure: Option<String>,
    state: DocumentState,
}

impl Document {
    /// A freshly discovered document whose outputs default to its original
    /// name inside `output_dir`.
    pub fn discovered(source_path: impl Into<PathBuf>, output_dir: &Path) -> Self {
        let source_path = source_path.into();
        let base_name = source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let destination = match source_path.file_name() {
            Some(name) => output_dir.join(name),
            None => output_dir.join(&base_name),
        };
        let text_destination = output_dir.join(format!("{}.txt", base_name));

        Self {
            source_path,
            text: String::new(),
            tags: BTreeSet::new(),
            first_date: String::new(),
            words: Vec::new(),
            base_name,
            renamed: false,
            destination,
            text_destination,
            processed: false,
            record_tags: false,
            failure: None,
            state: DocumentState::Discovered,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DocumentState {
        self.state
    }

    /// Move to `next`, which must be later than the current state.
    pub fn advance(&mut self, next: DocumentState) -> Result<()> {
        if next <= self.state {
            return Err(Error::InvalidTransition {
                path: self.source_path.clone(),
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    /// Original file name, used as the key in `tags.json`.
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Original file stem.
    pub fn stem(&self) -> String {
        self.source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Give the document a canonical base name; both destinations follow it.
    ///
    /// The document copy keeps the source extension, the text file gets `.txt`.
    pub fn rename_to(&mut self, base_name: String) {
        let dir = self
            .destination
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let file_name = match self.source_path.extension() {
            Some(ext) => format!("{}.{}", base_name, ext.to_string_lossy()),
            None => base_name.clone(),
        };

        self.destination = dir.join(file_name);
        self.text_destination = dir.join(format!("{}.txt", base_name));
        self.base_name = base_name;
        self.renamed = true;
    }

    /// Record a failure; the first one wins.
    pub fn fail(&mut self, reason: impl Into<String>) {
        if self.failure.is_none() {
            self.failure = Some(reason.into());
        }
    }

    /// Result record for `tags.json`.
    pub fn record(&self) -> TagRecord {
        TagRecord {
            original_path: self.source_path.clone(),
            new_path: self.destination.clone(),
            extracted_text_path: self.text_destination.clone(),
            first_date: self.first_date.clone(),
            tags: self.tags.iter().cloned().collect(),
            renamed: self.renamed,
            error: self.failure.clone(),
        }
    }
}

/// Per-document entry of `tags.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRecord {
    /// Source path
    pub original_path: PathBuf,
    /// Destination of the copy or link
    pub new_path: PathBuf,
    /// Destination of the extracted text
    pub extracted_text_path: PathBuf,
    /// Normalized first date or empty
    pub first_date: String,
    /// Matched keywords, sorted
    pub tags: Vec<String>,
    /// Whether the document was renamed
    pub renamed: bool,
    /// Failure description, if processing failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
