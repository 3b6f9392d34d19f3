//! Ambient Loader
//!
//! The system-wide package store: a directory with a sandbox-like
//! `specifications/` + `gems/` layout. Without a configured store the
//! ambient loader knows no packages.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::entities::ResolvedPackageSpec;
use crate::domain::ports::{MetadataIndex, PackageLoader};
use crate::error::BundleResult;
use crate::infrastructure::repositories::TomlMetadataIndex;
use crate::infrastructure::sandbox::SandboxLayout;

#[derive(Debug, Clone, Default)]
pub struct AmbientLoader {
    store: Option<PathBuf>,
    metadata: TomlMetadataIndex,
}

impl AmbientLoader {
    pub fn new(store: Option<PathBuf>) -> Self {
        Self {
            store,
            metadata: TomlMetadataIndex::new(),
        }
    }

    pub fn store(&self) -> Option<&Path> {
        self.store.as_deref()
    }

    /// Newest version of every package in the store, by name
    fn latest(&self) -> BundleResult<BTreeMap<String, ResolvedPackageSpec>> {
        let mut latest: BTreeMap<String, ResolvedPackageSpec> = BTreeMap::new();
        let Some(store) = &self.store else {
            return Ok(latest);
        };

        for spec in self
            .metadata
            .load(&SandboxLayout::new(store).specifications_dir())?
        {
            let newer = latest
                .get(spec.name())
                .map_or(true, |existing| existing.version() < spec.version());
            if newer {
                latest.insert(spec.name().to_string(), spec);
            }
        }
        Ok(latest)
    }

    /// Search path contributed by the store, ordered by package name
    pub fn ambient_path(&self) -> BundleResult<Vec<PathBuf>> {
        Ok(self
            .latest()?
            .values()
            .flat_map(ResolvedPackageSpec::load_path_entries)
            .collect())
    }
}

impl PackageLoader for AmbientLoader {
    fn find(&self, name: &str) -> BundleResult<Option<ResolvedPackageSpec>> {
        Ok(self.latest()?.remove(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;
    use tempfile::tempdir;

    fn publish(store: &Path, name: &str, version: &str) {
        let dir = store.join("specifications");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(format!("{name}-{version}.toml")),
            format!("name = \"{name}\"\nversion = \"{version}\"\n"),
        )
        .unwrap();
    }

    #[test]
    fn find_returns_newest_version() {
        let store = tempdir().unwrap();
        publish(store.path(), "json", "1.0.0");
        publish(store.path(), "json", "2.3.0");
        publish(store.path(), "json", "2.0.0");

        let loader = AmbientLoader::new(Some(store.path().to_path_buf()));
        let found = loader.find("json").unwrap().unwrap();
        assert_eq!(found.version(), &Version::new(2, 3, 0));
        assert!(loader.find("rack").unwrap().is_none());
    }

    #[test]
    fn without_store_nothing_is_found() {
        let loader = AmbientLoader::new(None);
        assert!(loader.find("json").unwrap().is_none());
        assert!(loader.ambient_path().unwrap().is_empty());
    }

    #[test]
    fn ambient_path_lists_require_paths() {
        let store = tempdir().unwrap();
        publish(store.path(), "json", "2.0.0");

        let loader = AmbientLoader::new(Some(store.path().to_path_buf()));
        assert_eq!(
            loader.ambient_path().unwrap(),
            vec![store.path().join("gems").join("json-2.0.0").join("lib")]
        );
    }
}
