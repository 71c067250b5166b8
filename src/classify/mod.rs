//! Keyword classification and collision-safe renaming.
//!
//! Classification is exact substring matching against an ordered rule table;
//! the first rule whose keywords all occur in a document names it. Names are
//! made unique through a [`NameRegistry`] shared by every processing unit.

pub mod registry;
pub mod renamer;
pub mod rules;

pub use registry::NameRegistry;
pub use renamer::{classify, Classification, Renamer, NO_TEXT_PREFIX};
pub use rules::{Rule, RuleTable};
