//! Ordered keyword rule table.
//!
//! Rules are data: a JSON array of `{ "name": ..., "keywords": [...] }`
//! objects, loaded once at startup and read-only afterwards. Table order is
//! priority order. A rule without keywords derives them from its name by
//! splitting on `-`:
//!
//! ```json
//! [
//!   { "name": "Tesla" },
//!   { "name": "Netapp-Stock", "keywords": ["netapp", "stock"] },
//!   { "name": "CVS-Drugs", "keywords": ["cvs", "pharmacy"] }
//! ]
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A canonical name and the keyword tokens that must all occur in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Canonical base name given to matching documents
    pub name: String,
    /// Lowercase keyword tokens; all must be present
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Rule {
    /// Create a rule.
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// True if every keyword of the rule is in `tags`.
    pub fn matches(&self, tags: &BTreeSet<String>) -> bool {
        self.keywords.iter().all(|keyword| tags.contains(keyword))
    }

    /// Lowercase keywords, deriving them from the name when none are given.
    fn normalized(mut self) -> Result<Self> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidRule {
                name: self.name,
                reason: "empty name".to_string(),
            });
        }

        if self.keywords.is_empty() {
            self.keywords = self.name.split('-').map(str::to_string).collect();
        }
        self.keywords = self
            .keywords
            .iter()
            .map(|keyword| keyword.trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();

        if self.keywords.is_empty() {
            return Err(Error::InvalidRule {
                name: self.name,
                reason: "no keywords".to_string(),
            });
        }
        Ok(self)
    }
}

/// Rules in priority order plus the union of their keywords.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
    keywords: BTreeSet<String>,
}

impl RuleTable {
    /// Build a table, normalizing every rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRule`] for a rule with an empty name or without
    /// any usable keyword.
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        let rules = rules
            .into_iter()
            .map(Rule::normalized)
            .collect::<Result<Vec<_>>>()?;
        let keywords = rules
            .iter()
            .flat_map(|rule| rule.keywords.iter().cloned())
            .collect();
        Ok(Self { rules, keywords })
    }

    /// Parse a table from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: Vec<Rule> = serde_json::from_str(json)?;
        Self::new(rules)
    }

    /// Load a table from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let table = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!(
            "Loaded {} rules ({} keywords) from {}",
            table.rules.len(),
            table.keywords.len(),
            path.display()
        );
        Ok(table)
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Every keyword used by any rule.
    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Keywords that occur as case-insensitive substrings of `text`.
    pub fn matched_keywords(&self, text: &str) -> BTreeSet<String> {
        let lower = text.to_lowercase();
        self.keywords
            .iter()
            .filter(|keyword| lower.contains(keyword.as_str()))
            .cloned()
            .collect()
    }

    /// First rule, in table order, whose keywords are all in `tags`.
    pub fn first_match(&self, tags: &BTreeSet<String>) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(tags))
    }
}
