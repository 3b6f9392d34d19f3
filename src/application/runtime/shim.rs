//! Loader shim - the sandbox's stand-in for the ambient package loader

use std::path::PathBuf;

use crate::domain::entities::{LoaderShimArtifact, ResolvedPackageSpec};
use crate::domain::ports::{BootstrapRepository, MetadataIndex, PackageLoader};
use crate::error::BundleResult;
use crate::infrastructure::sandbox::SandboxLayout;

use super::registry::ProcessRegistry;

/// Answers package lookups for a process that activated a sandbox.
///
/// Pinned registrations apply only while the registry carries the shim's
/// marker; otherwise every lookup goes to the ambient loader unchanged.
pub struct LoaderShim<'r, A, MI>
where
    A: PackageLoader,
    MI: MetadataIndex,
{
    artifact: LoaderShimArtifact,
    ambient: A,
    metadata: MI,
    registry: &'r ProcessRegistry,
}

impl<'r, A, MI> LoaderShim<'r, A, MI>
where
    A: PackageLoader,
    MI: MetadataIndex,
{
    pub fn new(
        artifact: LoaderShimArtifact,
        ambient: A,
        metadata: MI,
        registry: &'r ProcessRegistry,
    ) -> Self {
        Self {
            artifact,
            ambient,
            metadata,
            registry,
        }
    }

    /// Read the sandbox's `loader-shim.toml`
    pub fn load<BR: BootstrapRepository>(
        bootstrap_repo: &BR,
        sandbox: &SandboxLayout,
        ambient: A,
        metadata: MI,
        registry: &'r ProcessRegistry,
    ) -> BundleResult<Self> {
        let artifact = bootstrap_repo.load_loader_shim(&sandbox.loader_shim())?;
        Ok(Self::new(artifact, ambient, metadata, registry))
    }

    pub fn artifact(&self) -> &LoaderShimArtifact {
        &self.artifact
    }

    fn pinned(&self, name: &str) -> BundleResult<Option<ResolvedPackageSpec>> {
        if !self.registry.is_marked(self.artifact.marker()) {
            return Ok(None);
        }
        let Some(registration) = self.registry.active().and_then(|a| a.registration(name)) else {
            return Ok(None);
        };
        self.metadata.read(&registration.metadata).map(Some)
    }
}

impl<A, MI> PackageLoader for LoaderShim<'_, A, MI>
where
    A: PackageLoader,
    MI: MetadataIndex,
{
    fn find(&self, name: &str) -> BundleResult<Option<ResolvedPackageSpec>> {
        match self.pinned(name)? {
            Some(spec) => Ok(Some(spec)),
            None => self.ambient.find(name),
        }
    }

    fn search_path(&self, process_path: &[PathBuf]) -> Vec<PathBuf> {
        let stripped: Vec<PathBuf> = process_path
            .iter()
            .filter(|entry| entry.as_path() != self.artifact.strip_dir())
            .cloned()
            .collect();
        self.ambient.search_path(&stripped)
    }
}
