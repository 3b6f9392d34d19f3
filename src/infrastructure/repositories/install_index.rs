//! TOML Install Index Repository
//!
//! Implements the InstallIndexRepository port using TOML format.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{IndexEntry, InstallIndex};
use crate::domain::ports::file_system::FileSystem;
use crate::domain::ports::install_index_repository::{
    InstallIndexError, InstallIndexRepository, InstallIndexResult,
};
use crate::domain::value_objects::{ContentHash, PackageId};
use crate::infrastructure::fs::LocalFs;

/// TOML-based install index repository
///
/// Stores the index as `installed.toml` at the sandbox root.
pub struct TomlInstallIndexRepository {
    fs: LocalFs,
}

impl TomlInstallIndexRepository {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for TomlInstallIndexRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// TOML representation of one archive entry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlArchiveEntry {
    name: String,
    version: String,
    sha256: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fetched_at: Option<DateTime<Utc>>,
}

/// TOML representation of the index
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlInstallIndex {
    version: u32,
    #[serde(default)]
    archives: BTreeMap<String, TomlArchiveEntry>,
}

impl InstallIndexRepository for TomlInstallIndexRepository {
    fn load(&self, path: &Path) -> InstallIndexResult<InstallIndex> {
        if !self.fs.exists(path) {
            return Ok(InstallIndex::new());
        }

        let content = self
            .fs
            .read(path)
            .map_err(|e| InstallIndexError::Io(e.to_string()))?;
        let toml_index: TomlInstallIndex = toml::from_str(&content)
            .map_err(|e| InstallIndexError::InvalidFormat(e.to_string()))?;

        if toml_index.version != InstallIndex::FORMAT_VERSION {
            return Err(InstallIndexError::VersionMismatch {
                found: toml_index.version,
                expected: InstallIndex::FORMAT_VERSION,
            });
        }

        let mut index = InstallIndex::new();
        for (archive, entry) in toml_index.archives {
            let version = semver::Version::parse(&entry.version).map_err(|e| {
                InstallIndexError::InvalidFormat(format!("{}: version '{}': {}", archive, entry.version, e))
            })?;
            let mut index_entry = IndexEntry::new(
                PackageId::new(entry.name, version),
                ContentHash::from_hex(&entry.sha256),
            );
            if let Some(fetched_at) = entry.fetched_at {
                index_entry = index_entry.with_fetched_at(fetched_at);
            }
            index.record(archive, index_entry);
        }

        Ok(index)
    }

    fn save(&self, index: &InstallIndex, path: &Path) -> InstallIndexResult<()> {
        let archives = index
            .entries()
            .map(|(archive, entry)| {
                (
                    archive.to_string(),
                    TomlArchiveEntry {
                        name: entry.id().name().to_string(),
                        version: entry.id().version().to_string(),
                        sha256: entry.hash().hex().to_string(),
                        fetched_at: entry.fetched_at(),
                    },
                )
            })
            .collect();

        let toml_index = TomlInstallIndex {
            version: index.version(),
            archives,
        };

        let content = toml::to_string_pretty(&toml_index)
            .map_err(|e| InstallIndexError::InvalidFormat(e.to_string()))?;
        self.fs
            .write(path, &content)
            .map_err(|e| InstallIndexError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use semver::Version;
    use tempfile::tempdir;

    #[test]
    fn load_missing_file_returns_empty_index() {
        let dir = tempdir().unwrap();
        let repo = TomlInstallIndexRepository::new();

        let index = repo.load(&dir.path().join("installed.toml")).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn save_then_load_preserves_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("installed.toml");
        let repo = TomlInstallIndexRepository::new();

        let fetched_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut index = InstallIndex::new();
        index.record(
            "rack-1.0.0.pkg",
            IndexEntry::new(
                PackageId::new("rack", Version::new(1, 0, 0)),
                ContentHash::of(b"rack"),
            )
            .with_fetched_at(fetched_at),
        );
        repo.save(&index, &path).unwrap();

        let loaded = repo.load(&path).unwrap();
        assert_eq!(loaded, index);
    }

    #[test]
    fn load_rejects_unknown_format_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("installed.toml");
        std::fs::write(&path, "version = 9\n").unwrap();

        let err = TomlInstallIndexRepository::new().load(&path).unwrap_err();
        assert!(matches!(
            err,
            InstallIndexError::VersionMismatch { found: 9, expected: 1 }
        ));
    }

    #[test]
    fn load_or_new_recovers_from_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("installed.toml");
        std::fs::write(&path, "not [valid toml").unwrap();

        let index = TomlInstallIndexRepository::new().load_or_new(&path);
        assert!(index.is_empty());
    }
}
