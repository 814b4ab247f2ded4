//! Exclusion sets: symbols a group must never export.

use crate::collect::collect_functions;
use crate::Error;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashSet;
use tracing::debug;

/// Set of symbol names withheld from one export group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    names: HashSet<String>,
}

impl ExclusionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the set from implementation files under `root` plus hand-listed symbols.
    ///
    /// Sources are read in the given order; a missing source aborts the whole build.
    pub fn from_sources(
        root: &Utf8Path,
        sources: &[Utf8PathBuf],
        symbols: &[String],
    ) -> Result<Self, Error> {
        let mut set = Self::new();

        for source in sources {
            let path = root.join(source);
            let collected = collect_functions(&path)?;
            debug!("Collected {} exclusions from {}", collected.len(), path);
            set.extend(collected);
        }

        set.extend(symbols.iter().cloned());
        Ok(set)
    }

    /// Add a single symbol
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Check whether a symbol is excluded
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of distinct excluded symbols
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Extend<String> for ExclusionSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.names.extend(iter);
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
