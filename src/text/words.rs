//! Word extraction and corpus-wide word frequencies.

use std::collections::{BTreeMap, BTreeSet};

/// Minimum number of documents a word must appear in to be reported.
pub const MIN_WORD_COUNT: u64 = 4;

/// Minimum length (in characters) of a reported word.
pub const MIN_WORD_LEN: usize = 5;

/// Distinct lowercase words of a document, sorted.
///
/// Each whitespace-separated field is lowercased and stripped of trailing
/// punctuation. Fields that are shorter than two characters after stripping,
/// or that do not start with a letter or digit, are skipped.
///
/// # Examples
///
/// ```
/// use pdftag::text::words::document_words;
///
/// let words = document_words("Total: $42.00 total DUE, (see) x");
/// assert_eq!(words, vec!["due", "total"]);
/// ```
pub fn document_words(text: &str) -> Vec<String> {
    let words: BTreeSet<String> = text
        .split_whitespace()
        .filter_map(|field| {
            let lower = field.to_lowercase();
            let word = lower.trim_end_matches(|c: char| !c.is_alphanumeric());
            let mut chars = word.chars();
            let starts_alphanumeric = chars.next().is_some_and(char::is_alphanumeric);
            let long_enough = chars.next().is_some();
            (starts_alphanumeric && long_enough).then(|| word.to_string())
        })
        .collect();

    words.into_iter().collect()
}

/// Corpus-wide word frequency table.
///
/// Counts how many documents contain each word. Only words starting with a
/// letter are counted; numbers and amounts are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequency {
    counts: BTreeMap<String, u64>,
}

impl WordFrequency {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one document's distinct words.
    pub fn add_document<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            let word = word.as_ref();
            if word.chars().next().is_some_and(char::is_alphabetic) {
                *self.counts.entry(word.to_lowercase()).or_insert(0) += 1;
            }
        }
    }

    /// Count recorded for `word`.
    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words recorded.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Keep only words seen at least [`MIN_WORD_COUNT`] times and at least
    /// [`MIN_WORD_LEN`] characters long.
    pub fn pruned(self) -> BTreeMap<String, u64> {
        self.counts
            .into_iter()
            .filter(|(word, count)| {
                *count >= MIN_WORD_COUNT && word.chars().count() >= MIN_WORD_LEN
            })
            .collect()
    }
}
