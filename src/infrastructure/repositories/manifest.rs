//! TOML Manifest Repository
//!
//! Loads `Bundlebox.toml`:
//!
//! ```toml
//! sandbox = ".bundlebox"
//! sources = ["vendor/packages"]
//!
//! [[dependencies]]
//! name = "rack"
//! version = ">=1.0.0"
//! except = ["production"]
//! require = ["rack", "rack/utils"]
//! ```
//!
//! Relative sandbox paths resolve against the manifest's directory.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::entities::{DependencySpec, Manifest, DEFAULT_SANDBOX_DIR};
use crate::domain::ports::file_system::FileSystem;
use crate::domain::value_objects::{
    warnings_for_unknown_keys, ConfigWarning, Environment, RepositoryLocator,
};
use crate::error::{BundleError, BundleResult};
use crate::infrastructure::fs::LocalFs;

/// Conventional manifest file name
pub const MANIFEST_FILE: &str = "Bundlebox.toml";

#[derive(Debug, Deserialize)]
struct TomlManifest {
    #[serde(default)]
    sandbox: Option<PathBuf>,
    #[serde(default)]
    sources: Vec<String>,
    #[serde(default)]
    dependencies: Vec<TomlDependency>,
}

#[derive(Debug, Deserialize)]
struct TomlDependency {
    name: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    only: Option<BTreeSet<String>>,
    #[serde(default)]
    except: Option<BTreeSet<String>>,
    #[serde(default)]
    require: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlManifestRepository {
    fs: LocalFs,
}

impl TomlManifestRepository {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }

    /// Load a manifest and any non-fatal warnings
    pub fn load(&self, path: &Path) -> BundleResult<(Manifest, Vec<ConfigWarning>)> {
        let content = self.fs.read(path).map_err(|e| BundleError::Manifest {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        parse_manifest(&content, path, base)
    }
}

/// Parse manifest text. `file` is used for messages, `base` anchors
/// relative paths.
pub fn parse_manifest(
    content: &str,
    file: &Path,
    base: &Path,
) -> BundleResult<(Manifest, Vec<ConfigWarning>)> {
    let invalid = |message: String| BundleError::Manifest {
        file: file.to_path_buf(),
        message,
    };

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);
    let raw: TomlManifest = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| invalid(e.to_string()))?;

    let warnings = warnings_for_unknown_keys(content, file, unknown_paths);

    let mut seen = BTreeSet::new();
    let mut dependencies = Vec::with_capacity(raw.dependencies.len());
    for dep in raw.dependencies {
        if !seen.insert(dep.name.clone()) {
            return Err(invalid(format!("dependency '{}' is declared twice", dep.name)));
        }

        let version = dep.version.as_deref().unwrap_or("*");
        let requirement = semver::VersionReq::parse(version)
            .map_err(|e| invalid(format!("dependency '{}': version '{}': {}", dep.name, version, e)))?;

        for env in dep.only.iter().chain(dep.except.iter()).flatten() {
            Environment::parse(env)
                .map_err(|e| invalid(format!("dependency '{}': {}", dep.name, e)))?;
        }

        let mut spec = DependencySpec::new(dep.name, requirement);
        if let Some(only) = dep.only {
            spec = spec.with_only(only);
        }
        if let Some(except) = dep.except {
            spec = spec.with_except(except);
        }
        if let Some(require) = dep.require {
            spec = spec.with_require(require);
        }
        dependencies.push(spec);
    }

    let sandbox = raw
        .sandbox
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SANDBOX_DIR));
    let sandbox = if sandbox.is_absolute() {
        sandbox
    } else {
        base.join(sandbox)
    };

    let sources = raw.sources.into_iter().map(RepositoryLocator::new).collect();

    Ok((Manifest::new(sources, dependencies, sandbox), warnings))
}
