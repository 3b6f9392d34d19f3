//! Package entities
//!
//! - `InstalledPackageRecord` - a package archive found in the sandbox cache
//! - `ResolvedPackageSpec` - concrete metadata for one package version

use std::path::{Path, PathBuf};

use semver::Version;

use crate::domain::value_objects::PackageId;

use super::dependency::Requirement;

/// A package found in the sandbox's cache directory.
///
/// Transient: recomputed from disk on every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackageRecord {
    id: PackageId,
    archive: PathBuf,
}

impl InstalledPackageRecord {
    pub fn new(id: PackageId, archive: impl Into<PathBuf>) -> Self {
        Self {
            id,
            archive: archive.into(),
        }
    }

    pub fn id(&self) -> &PackageId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.id.name()
    }

    pub fn version(&self) -> &Version {
        self.id.version()
    }

    /// Archive file the record was derived from
    pub fn archive(&self) -> &Path {
        &self.archive
    }
}

/// Concrete metadata for one package version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackageSpec {
    id: PackageId,
    full_install_path: PathBuf,
    bin_dir: Option<String>,
    require_paths: Vec<String>,
    dependencies: Vec<Requirement>,
}

impl ResolvedPackageSpec {
    pub fn new(id: PackageId, full_install_path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            full_install_path: full_install_path.into(),
            bin_dir: None,
            require_paths: vec!["lib".to_string()],
            dependencies: Vec::new(),
        }
    }

    pub fn with_bin_dir(mut self, bin_dir: Option<String>) -> Self {
        self.bin_dir = bin_dir;
        self
    }

    pub fn with_require_paths(mut self, require_paths: Vec<String>) -> Self {
        self.require_paths = require_paths;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<Requirement>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn id(&self) -> &PackageId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.id.name()
    }

    pub fn version(&self) -> &Version {
        self.id.version()
    }

    /// Directory the package is unpacked into
    pub fn full_install_path(&self) -> &Path {
        &self.full_install_path
    }

    pub fn bin_dir(&self) -> Option<&str> {
        self.bin_dir.as_deref()
    }

    pub fn require_paths(&self) -> &[String] {
        &self.require_paths
    }

    /// Runtime dependencies of this package
    pub fn dependencies(&self) -> &[Requirement] {
        &self.dependencies
    }

    /// Search-path entries contributed by this package: bin dir first, then
    /// each require path, all under the install path.
    pub fn load_path_entries(&self) -> Vec<PathBuf> {
        self.bin_dir
            .iter()
            .chain(self.require_paths.iter())
            .map(|rel| self.full_install_path.join(rel))
            .collect()
    }

    /// Same package placed under a different install root
    pub fn relocated(mut self, full_install_path: impl Into<PathBuf>) -> Self {
        self.full_install_path = full_install_path.into();
        self
    }
}
