//! Load-Path Emitter
//!
//! Turns resolved specs into bootstrap artifacts under
//! `<sandbox>/environments/`. One artifact per environment plus a single
//! loader shim shared by all of them.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::domain::entities::{
    BootstrapArtifact, LoaderShimArtifact, Registration, ResolvedPackageSpec,
};
use crate::domain::ports::{BootstrapRepository, FileSystem};
use crate::domain::value_objects::{Environment, LoadPath, METADATA_EXTENSION};
use crate::error::BundleResult;
use crate::infrastructure::sandbox::{SandboxLayout, LOADER_SHIM_FILE};

pub struct LoadPathEmitter<'a, BR, FS>
where
    BR: BootstrapRepository,
    FS: FileSystem,
{
    sandbox: &'a SandboxLayout,
    marker: &'a str,
    bootstrap_repo: &'a BR,
    fs: &'a FS,
}

impl<'a, BR, FS> LoadPathEmitter<'a, BR, FS>
where
    BR: BootstrapRepository,
    FS: FileSystem,
{
    pub fn new(
        sandbox: &'a SandboxLayout,
        marker: &'a str,
        bootstrap_repo: &'a BR,
        fs: &'a FS,
    ) -> Self {
        Self {
            sandbox,
            marker,
            bootstrap_repo,
            fs,
        }
    }

    /// Build the artifact for `environment` from specs in resolver order
    pub fn artifact(
        &self,
        environment: &Environment,
        specs: &[ResolvedPackageSpec],
    ) -> BootstrapArtifact {
        let registrations = specs
            .iter()
            .map(|spec| Registration::new(spec.id(), self.sandbox.metadata(spec.id())))
            .collect();
        let load_path = LoadPath::for_specs(self.sandbox.environments_dir(), specs);

        BootstrapArtifact::new(environment.clone(), self.marker, registrations, load_path)
    }

    /// Write `environments/<environment>.toml`
    pub fn emit_environment(
        &self,
        environment: &Environment,
        specs: &[ResolvedPackageSpec],
    ) -> BundleResult<PathBuf> {
        let path = self.sandbox.bootstrap(environment);
        self.bootstrap_repo
            .save_environment(&self.artifact(environment, specs), &path)?;
        tracing::debug!(
            environment = %environment,
            packages = specs.len(),
            path = %path.display(),
            "wrote environment bootstrap"
        );
        Ok(path)
    }

    /// Write `environments/loader-shim.toml`
    pub fn emit_loader_shim(&self) -> BundleResult<PathBuf> {
        let path = self.sandbox.loader_shim();
        let artifact = LoaderShimArtifact::new(self.sandbox.environments_dir(), self.marker);
        self.bootstrap_repo.save_loader_shim(&artifact, &path)?;
        Ok(path)
    }

    /// Delete bootstraps of environments no longer declared
    pub fn prune(&self, keep: &BTreeSet<Environment>) -> BundleResult<Vec<PathBuf>> {
        let dir = self.sandbox.environments_dir();
        let suffix = format!(".{}", METADATA_EXTENSION);
        let mut removed = Vec::new();

        for name in self.fs.list_dir(&dir)? {
            if name == LOADER_SHIM_FILE {
                continue;
            }
            let Some(env_name) = name.strip_suffix(&suffix) else {
                continue;
            };
            if keep.contains(&Environment::new(env_name)) {
                continue;
            }
            let path = dir.join(&name);
            self.fs.remove(&path)?;
            tracing::info!(environment = env_name, "removed bootstrap of undeclared environment");
            removed.push(path);
        }

        Ok(removed)
    }
}
