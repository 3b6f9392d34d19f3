//! TOML Metadata Index
//!
//! Implements the MetadataIndex port over a `specifications/` directory of
//! `<name>-<version>.toml` files. Install paths are derived from the layout:
//! a spec in `<root>/specifications/` installs into `<root>/gems/<name>-<version>`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Requirement, ResolvedPackageSpec};
use crate::domain::ports::file_system::FileSystem;
use crate::domain::ports::MetadataIndex;
use crate::domain::value_objects::{PackageId, METADATA_EXTENSION};
use crate::error::{BundleError, BundleResult};
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::sandbox::GEMS_DIR;

/// TOML representation of a package metadata file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TomlPackageSpec {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin_dir: Option<String>,
    #[serde(default = "default_require_paths")]
    pub require_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<TomlRuntimeDependency>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TomlRuntimeDependency {
    pub name: String,
    #[serde(default = "any_version")]
    pub version: String,
}

fn default_require_paths() -> Vec<String> {
    vec!["lib".to_string()]
}

fn any_version() -> String {
    "*".to_string()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlMetadataIndex {
    fs: LocalFs,
}

impl TomlMetadataIndex {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }

    fn install_root(file: &Path) -> PathBuf {
        let specifications = file.parent().unwrap_or_else(|| Path::new("."));
        let root = specifications.parent().unwrap_or_else(|| Path::new("."));
        root.join(GEMS_DIR)
    }

    fn parse(&self, file: &Path, content: &str) -> BundleResult<ResolvedPackageSpec> {
        let invalid = |message: String| BundleError::Metadata {
            file: file.to_path_buf(),
            message,
        };

        let raw: TomlPackageSpec = toml::from_str(content).map_err(|e| invalid(e.to_string()))?;
        let version = semver::Version::parse(&raw.version)
            .map_err(|e| invalid(format!("version '{}': {}", raw.version, e)))?;

        let dependencies = raw
            .dependencies
            .into_iter()
            .map(|dep| {
                semver::VersionReq::parse(&dep.version)
                    .map(|req| Requirement::new(dep.name.clone(), req))
                    .map_err(|e| invalid(format!("dependency '{}': {}", dep.name, e)))
            })
            .collect::<BundleResult<Vec<_>>>()?;

        let id = PackageId::new(raw.name, version);
        let install_path = Self::install_root(file).join(id.full_name());

        Ok(ResolvedPackageSpec::new(id, install_path)
            .with_bin_dir(raw.bin_dir)
            .with_require_paths(raw.require_paths)
            .with_dependencies(dependencies))
    }
}

impl MetadataIndex for TomlMetadataIndex {
    fn load(&self, dir: &Path) -> BundleResult<Vec<ResolvedPackageSpec>> {
        let suffix = format!(".{}", METADATA_EXTENSION);
        let mut specs = Vec::new();

        for name in self.fs.list_dir(dir)? {
            if !name.ends_with(&suffix) {
                continue;
            }
            specs.push(self.read(&dir.join(&name))?);
        }

        tracing::debug!(dir = %dir.display(), count = specs.len(), "loaded package metadata");
        Ok(specs)
    }

    fn read(&self, file: &Path) -> BundleResult<ResolvedPackageSpec> {
        let content = self.fs.read(file)?;
        self.parse(file, &content)
    }
}

/// Render a spec back to its metadata file form
#[cfg(test)]
pub(crate) fn render_spec(spec: &ResolvedPackageSpec) -> BundleResult<String> {
    let raw = TomlPackageSpec {
        name: spec.name().to_string(),
        version: spec.version().to_string(),
        bin_dir: spec.bin_dir().map(str::to_string),
        require_paths: spec.require_paths().to_vec(),
        dependencies: spec
            .dependencies()
            .iter()
            .map(|dep| TomlRuntimeDependency {
                name: dep.name().to_string(),
                version: dep.version_req().to_string(),
            })
            .collect(),
    };
    toml::to_string_pretty(&raw).map_err(|e| BundleError::Metadata {
        file: PathBuf::from(spec.id().metadata_file_name()),
        message: e.to_string(),
    })
}
