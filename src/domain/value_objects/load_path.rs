//! Load path value object - the search-path ordering contract
//!
//! A bootstrap artifact prepends entries to the module search path. Two
//! orders matter and both are fixed here:
//!
//! - **Emission order** (what the artifact lists):
//!   `[root, X.bin, X.require.., Y.bin, Y.require..]` for resolved specs
//!   `[X, Y]`. The root is the bootstrap directory that also holds the
//!   loader shim.
//! - **Effective order** (what lookups walk): explicit entries in emission
//!   order, then the root, then the ambient search path. Earlier specs win
//!   over later ones; explicit entries win over the root; the sandbox wins
//!   over the ambient store. A repeated entry keeps its first position.

use std::path::{Path, PathBuf};

use crate::domain::entities::ResolvedPackageSpec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadPath {
    root: PathBuf,
    entries: Vec<PathBuf>,
}

impl LoadPath {
    /// Build from a root and explicit entries (already in emission order)
    pub fn new(root: impl Into<PathBuf>, entries: Vec<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries,
        }
    }

    /// Build from resolved specs in resolver order
    pub fn for_specs(root: impl Into<PathBuf>, specs: &[ResolvedPackageSpec]) -> Self {
        let entries = specs
            .iter()
            .flat_map(ResolvedPackageSpec::load_path_entries)
            .collect();
        Self::new(root, entries)
    }

    /// The bootstrap root (emitted first)
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Explicit entries in emission order
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Entries exactly as a bootstrap artifact lists them
    pub fn emission_order(&self) -> Vec<PathBuf> {
        std::iter::once(self.root.clone())
            .chain(self.entries.iter().cloned())
            .collect()
    }

    /// Rebuild from an emission-ordered list (first element is the root)
    pub fn from_emission_order(mut emitted: Vec<PathBuf>) -> Option<Self> {
        if emitted.is_empty() {
            return None;
        }
        let root = emitted.remove(0);
        Some(Self::new(root, emitted))
    }

    /// Search path seen by lookups, highest priority first
    pub fn effective(&self, ambient: &[PathBuf]) -> Vec<PathBuf> {
        let mut seen: Vec<PathBuf> = Vec::new();
        let ordered = self
            .entries
            .iter()
            .chain(std::iter::once(&self.root))
            .chain(ambient.iter());
        for entry in ordered {
            if !seen.contains(entry) {
                seen.push(entry.clone());
            }
        }
        seen
    }
}
