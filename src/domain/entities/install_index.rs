//! Install index entity - persisted identity of fetched archives
//!
//! Keys are archive file names inside `cache/`. The index records which
//! package each archive holds so identity does not have to be re-derived
//! from the file name. It's a pure data structure - persistence is handled
//! by `InstallIndexRepository`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{ContentHash, PackageId};

/// Index entry for one cached archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    id: PackageId,
    /// SHA-256 of the archive when it was fetched
    hash: ContentHash,
    fetched_at: Option<DateTime<Utc>>,
}

impl IndexEntry {
    pub fn new(id: PackageId, hash: ContentHash) -> Self {
        Self {
            id,
            hash,
            fetched_at: None,
        }
    }

    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = Some(fetched_at);
        self
    }

    pub fn id(&self) -> &PackageId {
        &self.id
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }
}

/// Persisted record of every fetched archive
#[derive(Debug, Clone, PartialEq)]
pub struct InstallIndex {
    /// Format version
    version: u32,
    /// Archive file name -> entry
    entries: BTreeMap<String, IndexEntry>,
}

impl InstallIndex {
    /// Current format version
    pub const FORMAT_VERSION: u32 = 1;

    /// Create a new empty index
    pub fn new() -> Self {
        Self {
            version: Self::FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Record an archive
    pub fn record(&mut self, archive_file_name: impl Into<String>, entry: IndexEntry) {
        self.entries.insert(archive_file_name.into(), entry);
    }

    /// Look up the entry for an archive file name
    pub fn get(&self, archive_file_name: &str) -> Option<&IndexEntry> {
        self.entries.get(archive_file_name)
    }

    /// Identity recorded for an archive file name
    pub fn identity_of(&self, archive_file_name: &str) -> Option<&PackageId> {
        self.entries.get(archive_file_name).map(IndexEntry::id)
    }

    /// Remove every entry recording `id`; returns the removed archive names
    pub fn forget(&mut self, id: &PackageId) -> Vec<String> {
        let keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.id() == id)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &keys {
            self.entries.remove(key);
        }
        keys
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &IndexEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Default for InstallIndex {
    fn default() -> Self {
        Self::new()
    }
}
