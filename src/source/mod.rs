//! Glyph sources: the seam between PDF decoding and text reconstruction.
//!
//! Decoding, decryption and content-stream interpretation are delegated to a
//! [`GlyphSource`]. The crate ships [`PdfOxideSource`] (feature `pdf`) for real
//! files and [`MemorySource`] for fixtures and tests.

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "pdf")]
pub use pdf::PdfOxideSource;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::layout::Glyph;

/// Supplies the positioned glyphs of every page of a document.
///
/// Implementations are shared by all processing units, so they must be
/// `Send + Sync`.
pub trait GlyphSource: Send + Sync {
    /// Decode `path` and return one glyph sequence per page, in page order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] when the document cannot be opened or
    /// decoded (including a missing or wrong password).
    fn pages(&self, path: &Path) -> Result<Vec<Vec<Glyph>>>;
}

/// In-memory glyph source keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<PathBuf, Vec<Vec<Glyph>>>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the pages of a document.
    pub fn insert(&mut self, path: impl Into<PathBuf>, pages: Vec<Vec<Glyph>>) {
        self.documents.insert(path.into(), pages);
    }

    /// Builder variant of [`insert`](Self::insert).
    pub fn with_document(mut self, path: impl Into<PathBuf>, pages: Vec<Vec<Glyph>>) -> Self {
        self.insert(path, pages);
        self
    }
}

impl GlyphSource for MemorySource {
    fn pages(&self, path: &Path) -> Result<Vec<Vec<Glyph>>> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| Error::Decode {
                path: path.to_path_buf(),
                reason: "no such document".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_lookup() {
        let source = MemorySource::new()
            .with_document("a.pdf", vec![vec![Glyph::new(0.0, 0.0, 5.0, 10.0, "F1", "a")]]);

        let pages = source.pages(Path::new("a.pdf")).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0][0].text, "a");
    }

    #[test]
    fn test_memory_source_missing_document() {
        let err = MemorySource::new().pages(Path::new("missing.pdf")).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
