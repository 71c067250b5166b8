//! Rejection of pages whose reconstructed text is mostly noise.
//!
//! Custom-encoded or corrupted fonts map glyphs to punctuation and symbol
//! soup. Such pages would pollute keyword matching, so a page is kept only if
//! most of its space-separated tokens start with a letter or digit.

/// Token statistics for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenCounts {
    /// Tokens after splitting on `' '` (empty tokens included)
    pub total: usize,
    /// Tokens whose first character is alphanumeric
    pub good: usize,
}

impl TokenCounts {
    /// Count the tokens of `text`.
    pub fn of(text: &str) -> Self {
        let mut counts = Self::default();
        for token in text.split(' ') {
            counts.total += 1;
            if token.chars().next().is_some_and(char::is_alphanumeric) {
                counts.good += 1;
            }
        }
        counts
    }

    /// Good tokens form a strict majority.
    pub fn is_majority_good(&self) -> bool {
        self.good * 2 > self.total
    }
}

/// Decide whether a page's text is kept.
///
/// Exactly half good tokens is not enough. An empty page consists of a single
/// empty token and is rejected.
///
/// # Examples
///
/// ```
/// use pdftag::layout::keep_page;
///
/// assert!(keep_page("Statement period 01/31"));
/// assert!(!keep_page("§§ ¶¶ ok fine"));
/// ```
pub fn keep_page(text: &str) -> bool {
    TokenCounts::of(text).is_majority_good()
}
