//! Bootstrap artifacts
//!
//! - `BootstrapArtifact` - per-environment registrations plus load path
//! - `LoaderShimArtifact` - the single loader override for a sandbox
//!
//! Pure data; rendering and parsing live in `BootstrapRepository`.

use std::path::{Path, PathBuf};

use semver::Version;

use crate::domain::value_objects::{Environment, LoadPath, PackageId};

/// Format version written into every artifact
pub const BOOTSTRAP_FORMAT_VERSION: u32 = 1;

/// One pinned package registration: which metadata file backs a name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub version: Version,
    /// Absolute path of the package's metadata file in the sandbox
    pub metadata: PathBuf,
}

impl Registration {
    pub fn new(id: &PackageId, metadata: impl Into<PathBuf>) -> Self {
        Self {
            name: id.name().to_string(),
            version: id.version().clone(),
            metadata: metadata.into(),
        }
    }
}

/// Per-environment bootstrap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapArtifact {
    environment: Environment,
    marker: String,
    registrations: Vec<Registration>,
    load_path: LoadPath,
}

impl BootstrapArtifact {
    pub fn new(
        environment: Environment,
        marker: impl Into<String>,
        registrations: Vec<Registration>,
        load_path: LoadPath,
    ) -> Self {
        Self {
            environment,
            marker: marker.into(),
            registrations,
            load_path,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Process marker set when this bootstrap is activated
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Registrations in resolver order
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn load_path(&self) -> &LoadPath {
        &self.load_path
    }
}

/// Loader override placed in the bootstrap root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderShimArtifact {
    strip_dir: PathBuf,
    marker: String,
}

impl LoaderShimArtifact {
    pub fn new(strip_dir: impl Into<PathBuf>, marker: impl Into<String>) -> Self {
        Self {
            strip_dir: strip_dir.into(),
            marker: marker.into(),
        }
    }

    /// Directory the shim removes from the search path (its own)
    pub fn strip_dir(&self) -> &Path {
        &self.strip_dir
    }

    /// Marker whose presence makes the shim re-apply pinned registrations
    pub fn marker(&self) -> &str {
        &self.marker
    }
}
