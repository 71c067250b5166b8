//! Rule-based classification and canonical naming.

use std::collections::BTreeSet;

use super::{NameRegistry, Rule, RuleTable};

/// Prefix given to documents from which no text could be recovered.
pub const NO_TEXT_PREFIX: &str = "notext-";

/// Outcome of matching a document against the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'r> {
    /// No keyword matched and the document has no text
    NoText,
    /// Text present, but no keyword or no complete rule matched
    Unmatched,
    /// First rule in table order whose keywords are all present
    Matched(&'r Rule),
}

/// Classify a document from its text and matched keyword tags.
pub fn classify<'r>(
    text: &str,
    tags: &BTreeSet<String>,
    rules: &'r RuleTable,
) -> Classification<'r> {
    if tags.is_empty() {
        return if text.is_empty() {
            Classification::NoText
        } else {
            Classification::Unmatched
        };
    }

    rules
        .first_match(tags)
        .map_or(Classification::Unmatched, Classification::Matched)
}

/// Produces collision-free canonical base names.
#[derive(Debug, Clone, Copy)]
pub struct Renamer<'a> {
    rules: &'a RuleTable,
    registry: &'a NameRegistry,
}

impl<'a> Renamer<'a> {
    /// Create a renamer over a rule table and a shared registry.
    pub fn new(rules: &'a RuleTable, registry: &'a NameRegistry) -> Self {
        Self { rules, registry }
    }

    /// Canonical base name for a document, or `None` if it keeps its name.
    ///
    /// * matched rule: `rule.name + date`, e.g. `Tesla-2021-Mar-3`
    /// * no text: `notext-<stem>` (no date)
    ///
    /// The candidate is claimed in the registry, which appends `-1`, `-2`, ...
    /// on collision.
    pub fn canonical_name(
        &self,
        stem: &str,
        text: &str,
        tags: &BTreeSet<String>,
        date: &str,
    ) -> Option<String> {
        let candidate = match classify(text, tags, self.rules) {
            Classification::Matched(rule) => format!("{}{}", rule.name, date),
            Classification::NoText => format!("{}{}", NO_TEXT_PREFIX, stem),
            Classification::Unmatched => return None,
        };

        let name = self.registry.claim(&candidate);
        if name != candidate {
            log::debug!("'{}' already taken, using '{}'", candidate, name);
        }
        Some(name)
    }
}
