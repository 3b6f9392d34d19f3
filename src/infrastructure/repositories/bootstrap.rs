//! TOML Bootstrap Repository
//!
//! Renders and parses `environments/<env>.toml` and
//! `environments/loader-shim.toml`. Rendering is a pure function of the
//! artifact, so regenerating from unchanged input yields identical bytes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    BootstrapArtifact, LoaderShimArtifact, Registration, BOOTSTRAP_FORMAT_VERSION,
};
use crate::domain::ports::file_system::FileSystem;
use crate::domain::ports::BootstrapRepository;
use crate::domain::value_objects::{Environment, LoadPath};
use crate::error::{BundleError, BundleResult};
use crate::infrastructure::fs::LocalFs;

const HEADER: &str = "# Generated by bundlebox. Do not edit.\n";

/// The only loader the shim knows how to delegate to
const AMBIENT_DELEGATE: &str = "ambient";

#[derive(Debug, Serialize, Deserialize)]
struct TomlBootstrap {
    format: u32,
    environment: String,
    marker: String,
    /// Emission order: bootstrap root first
    load_path: Vec<PathBuf>,
    #[serde(default)]
    registrations: Vec<TomlRegistration>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlRegistration {
    name: String,
    version: String,
    metadata: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlLoaderShim {
    format: u32,
    strip_dir: PathBuf,
    delegate: String,
    marker: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlBootstrapRepository {
    fs: LocalFs,
}

impl TomlBootstrapRepository {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }

    /// Render an environment bootstrap to its file contents
    pub fn render_environment(artifact: &BootstrapArtifact) -> BundleResult<String> {
        let doc = TomlBootstrap {
            format: BOOTSTRAP_FORMAT_VERSION,
            environment: artifact.environment().to_string(),
            marker: artifact.marker().to_string(),
            load_path: artifact.load_path().emission_order(),
            registrations: artifact
                .registrations()
                .iter()
                .map(|r| TomlRegistration {
                    name: r.name.clone(),
                    version: r.version.to_string(),
                    metadata: r.metadata.clone(),
                })
                .collect(),
        };
        render(&doc, artifact.environment().bootstrap_file_name())
    }

    /// Render the loader shim to its file contents
    pub fn render_loader_shim(artifact: &LoaderShimArtifact) -> BundleResult<String> {
        let doc = TomlLoaderShim {
            format: BOOTSTRAP_FORMAT_VERSION,
            strip_dir: artifact.strip_dir().to_path_buf(),
            delegate: AMBIENT_DELEGATE.to_string(),
            marker: artifact.marker().to_string(),
        };
        render(&doc, crate::infrastructure::sandbox::LOADER_SHIM_FILE.to_string())
    }

    fn parse_environment(path: &Path, content: &str) -> BundleResult<BootstrapArtifact> {
        let invalid = |message: String| BundleError::Bootstrap {
            file: path.to_path_buf(),
            message,
        };

        let doc: TomlBootstrap = toml::from_str(content).map_err(|e| invalid(e.to_string()))?;
        check_format(doc.format).map_err(invalid)?;

        let load_path = LoadPath::from_emission_order(doc.load_path)
            .ok_or_else(|| invalid("load_path is empty".to_string()))?;

        let registrations = doc
            .registrations
            .into_iter()
            .map(|r| {
                let version = semver::Version::parse(&r.version)
                    .map_err(|e| invalid(format!("registration '{}': {}", r.name, e)))?;
                Ok(Registration {
                    name: r.name,
                    version,
                    metadata: r.metadata,
                })
            })
            .collect::<BundleResult<Vec<_>>>()?;

        Ok(BootstrapArtifact::new(
            Environment::new(doc.environment),
            doc.marker,
            registrations,
            load_path,
        ))
    }

    fn parse_loader_shim(path: &Path, content: &str) -> BundleResult<LoaderShimArtifact> {
        let invalid = |message: String| BundleError::Bootstrap {
            file: path.to_path_buf(),
            message,
        };

        let doc: TomlLoaderShim = toml::from_str(content).map_err(|e| invalid(e.to_string()))?;
        check_format(doc.format).map_err(invalid)?;
        if doc.delegate != AMBIENT_DELEGATE {
            return Err(invalid(format!("unknown delegate '{}'", doc.delegate)));
        }
        Ok(LoaderShimArtifact::new(doc.strip_dir, doc.marker))
    }
}

fn render<T: Serialize>(doc: &T, file: String) -> BundleResult<String> {
    let body = toml::to_string_pretty(doc).map_err(|e| BundleError::Bootstrap {
        file: PathBuf::from(file),
        message: e.to_string(),
    })?;
    Ok(format!("{}{}", HEADER, body))
}

fn check_format(found: u32) -> Result<(), String> {
    if found == BOOTSTRAP_FORMAT_VERSION {
        Ok(())
    } else {
        Err(format!(
            "format {} is not supported (expected {})",
            found, BOOTSTRAP_FORMAT_VERSION
        ))
    }
}

impl BootstrapRepository for TomlBootstrapRepository {
    fn save_environment(&self, artifact: &BootstrapArtifact, path: &Path) -> BundleResult<()> {
        let content = Self::render_environment(artifact)?;
        self.fs.write(path, &content)?;
        Ok(())
    }

    fn load_environment(&self, path: &Path) -> BundleResult<BootstrapArtifact> {
        let content = self.fs.read(path)?;
        Self::parse_environment(path, &content)
    }

    fn save_loader_shim(&self, artifact: &LoaderShimArtifact, path: &Path) -> BundleResult<()> {
        let content = Self::render_loader_shim(artifact)?;
        self.fs.write(path, &content)?;
        Ok(())
    }

    fn load_loader_shim(&self, path: &Path) -> BundleResult<LoaderShimArtifact> {
        let content = self.fs.read(path)?;
        Self::parse_loader_shim(path, &content)
    }
}
