//! Document-level text: page assembly, dates and words.

pub mod date;
pub mod words;

pub use date::{first_date, normalize_first_date};
pub use words::{document_words, WordFrequency};

use std::path::Path;

use crate::error::Result;
use crate::layout::{keep_page, LayoutConfig, LayoutReconstructor};
use crate::source::GlyphSource;

/// Join the kept pages of a document and drop wide characters.
///
/// Pages rejected by [`keep_page`] are skipped; kept pages are joined with
/// `'\n'` in their original order. Only single-byte (ASCII) non-NUL characters
/// survive, which removes most font-substitution artifacts.
///
/// # Examples
///
/// ```
/// use pdftag::text::assemble_document_text;
///
/// let pages = ["Invoice №1 total", "@@ ## $$", "Thank you"];
/// assert_eq!(assemble_document_text(pages), "Invoice 1 total\nThank you");
/// ```
pub fn assemble_document_text<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    let mut kept = 0;
    for page in pages {
        let page = page.as_ref();
        if !keep_page(page) {
            continue;
        }
        if kept > 0 {
            text.push('\n');
        }
        text.extend(page.chars().filter(|c| c.is_ascii() && *c != '\0'));
        kept += 1;
    }
    text
}

/// Decode `path` through `source`, reconstruct every page and assemble the
/// document text.
///
/// # Errors
///
/// Propagates the source's decode error.
pub fn extract_document_text(
    source: &dyn GlyphSource,
    path: &Path,
    layout: &LayoutConfig,
) -> Result<String> {
    let reconstructor = LayoutReconstructor::with_config(*layout);
    let pages = source.pages(path)?;
    log::debug!("{}: {} pages", path.display(), pages.len());

    let texts: Vec<String> = pages
        .iter()
        .map(|glyphs| reconstructor.reconstruct(glyphs).text())
        .collect();

    Ok(assemble_document_text(texts))
}
