//! Manifest entity - the declared sources, dependencies and sandbox of a project
//!
//! Loaded once per invocation by a `ManifestRepository`; immutable afterwards.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::RepositoryLocator;

use super::dependency::{DependencySpec, Requirement};

/// Default sandbox directory, relative to the project root
pub const DEFAULT_SANDBOX_DIR: &str = ".bundlebox";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    sources: Vec<RepositoryLocator>,
    dependencies: Vec<DependencySpec>,
    sandbox: PathBuf,
}

impl Manifest {
    pub fn new(
        sources: Vec<RepositoryLocator>,
        dependencies: Vec<DependencySpec>,
        sandbox: impl Into<PathBuf>,
    ) -> Self {
        Self {
            sources,
            dependencies,
            sandbox: sandbox.into(),
        }
    }

    pub fn sources(&self) -> &[RepositoryLocator] {
        &self.sources
    }

    /// Declared dependencies in declaration order
    pub fn dependencies(&self) -> &[DependencySpec] {
        &self.dependencies
    }

    /// Root of the sandbox directory tree
    pub fn sandbox(&self) -> &Path {
        &self.sandbox
    }

    /// Every declared dependency as a requirement, unfiltered
    pub fn requirements(&self) -> Vec<Requirement> {
        self.dependencies
            .iter()
            .map(DependencySpec::to_requirement)
            .collect()
    }

    /// Marker identifying this manifest's bootstraps within a process
    pub fn bootstrap_marker(&self) -> String {
        format!(
            "bundlebox:{}",
            self.sandbox.to_string_lossy().replace('\\', "/")
        )
    }
}
