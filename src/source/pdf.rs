//! [`GlyphSource`] backed by `pdf_oxide`.
//!
//! `pdf_oxide` yields text spans with a bounding box in PDF user space. A span
//! usually covers a whole run of text, often a full line with spaces already
//! inserted, so each span is split into per-character [`Glyph`]s before layout
//! reconstruction sees it.

use std::path::Path;

use pdf_oxide::layout::TextSpan;
use pdf_oxide::PdfDocument;

use super::GlyphSource;
use crate::error::{Error, Result};
use crate::layout::Glyph;

/// Decodes PDF files with `pdf_oxide`.
///
/// A document that cannot be opened is a decode error. A single page that
/// fails to decode is skipped with a warning so that the rest of the document
/// can still be classified.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfOxideSource;

impl PdfOxideSource {
    /// Create a new source.
    pub fn new() -> Self {
        Self
    }
}

impl GlyphSource for PdfOxideSource {
    fn pages(&self, path: &Path) -> Result<Vec<Vec<Glyph>>> {
        let decode_error = |err: pdf_oxide::Error| Error::Decode {
            path: path.to_path_buf(),
            reason: err.to_string(),
        };

        let doc = PdfDocument::open(path).map_err(decode_error)?;
        let page_count = doc.page_count().map_err(decode_error)?;

        let mut pages = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            match doc.extract_spans(page_index) {
                Ok(spans) => pages.push(spans.iter().flat_map(glyphs_from_span).collect()),
                Err(err) => {
                    log::warn!("{}: skipping page {}: {}", path.display(), page_index + 1, err);
                },
            }
        }

        Ok(pages)
    }
}

fn glyphs_from_span(span: &TextSpan) -> Vec<Glyph> {
    Glyph::new(
        span.bbox.x,
        span.bbox.y,
        span.bbox.width,
        span.font_size,
        span.font_name.as_str(),
        span.text.as_str(),
    )
    .split_chars()
}
