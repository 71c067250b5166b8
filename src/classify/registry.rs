//! Name-dedup registry shared by all processing units.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::error::Result;

/// Set of canonical base names already claimed in the output location.
///
/// Seeded from the files already present in the output directory and grown
/// as documents are renamed. Names are never released during a run, so the
/// registry only grows and a name is held by at most one document.
#[derive(Debug, Default)]
pub struct NameRegistry {
    claimed: Mutex<HashSet<String>>,
}

impl NameRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding `names`.
    pub fn seeded<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            claimed: Mutex::new(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Seed from the stems of the files with extension `extension` in `dir`.
    ///
    /// A missing directory yields an empty registry.
    pub fn seed_from_dir(dir: &Path, extension: &str) -> Result<Self> {
        if !dir.is_dir() {
            return Ok(Self::new());
        }

        let mut names = HashSet::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == extension) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.insert(stem.to_string());
                }
            }
        }

        log::debug!("Seeded name registry with {} names from {}", names.len(), dir.display());
        Ok(Self {
            claimed: Mutex::new(names),
        })
    }

    /// Claim `candidate`, or the first free `candidate-1`, `candidate-2`, ...
    ///
    /// The lookup and the insertion happen under one lock, so concurrent
    /// claims of the same candidate always receive distinct names.
    pub fn claim(&self, candidate: &str) -> String {
        let mut claimed = self.lock();

        let name = if claimed.contains(candidate) {
            (1..)
                .map(|suffix| format!("{}-{}", candidate, suffix))
                .find(|next| !claimed.contains(next))
                .unwrap_or_else(|| candidate.to_string())
        } else {
            candidate.to_string()
        };

        claimed.insert(name.clone());
        name
    }

    /// Claim exactly `name`, without suffixing.
    ///
    /// Returns `false`, leaving the registry unchanged, if `name` is already
    /// held.
    pub fn try_claim(&self, name: &str) -> bool {
        self.lock().insert(name.to_string())
    }

    /// True if `name` has been claimed.
    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains(name)
    }

    /// Number of claimed names.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if no name has been claimed.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave the set half-updated
    // (insert is the last step), so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.claimed.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
