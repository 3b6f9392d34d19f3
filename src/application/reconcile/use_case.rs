//! Manifest Reconciler
//!
//! Orchestrates the install flow:
//! 1. Fetch unless every requirement is already installed
//! 2. Install fetched archives
//! 3. Delete packages outside the unrestricted resolved view
//! 4. Write one bootstrap per environment, then the loader shim
//!
//! Version selection is delegated to the `Resolver` (remote) and to the
//! `MetadataIndex` (local); this use case only orchestrates.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;

use crate::application::emitter::LoadPathEmitter;
use crate::domain::entities::{
    IndexEntry, InstalledPackageRecord, Manifest, Requirement, ResolvedPackageSpec,
};
use crate::domain::ports::{
    BootstrapRepository, FileSystem, InstallIndexRepository, Installer, MetadataIndex,
    NoopEventSink, ReconcileEvent, ReconcileEventSink, Resolver,
};
use crate::domain::services::{
    all_environments, detect_stale, index_installed, resolve, select, unsatisfied,
};
use crate::domain::value_objects::{Environment, PackageId};
use crate::error::{BundleError, BundleResult, UnresolvedDependency};
use crate::infrastructure::sandbox::{SandboxLayout, SandboxLock};

use super::options::InstallOptions;
use super::result::{CleanupReport, EnvironmentReport, FetchOutcome, InstallReport};

/// Manifest reconciler - keeps one sandbox in line with one manifest
///
/// Parameterized by its storage ports; the resolver and installer are
/// trait objects supplied by the caller.
pub struct ManifestReconciler<IR, MI, BR, FS>
where
    IR: InstallIndexRepository,
    MI: MetadataIndex,
    BR: BootstrapRepository,
    FS: FileSystem,
{
    manifest: Manifest,
    sandbox: SandboxLayout,
    resolver: Box<dyn Resolver>,
    installer: Box<dyn Installer>,
    index_repo: IR,
    metadata: MI,
    bootstrap_repo: BR,
    fs: FS,
    default_bin_dir: PathBuf,
    events: Arc<dyn ReconcileEventSink>,
}

impl<IR, MI, BR, FS> ManifestReconciler<IR, MI, BR, FS>
where
    IR: InstallIndexRepository,
    MI: MetadataIndex,
    BR: BootstrapRepository,
    FS: FileSystem,
{
    pub fn new(
        manifest: Manifest,
        resolver: Box<dyn Resolver>,
        installer: Box<dyn Installer>,
        index_repo: IR,
        metadata: MI,
        bootstrap_repo: BR,
        fs: FS,
    ) -> Self {
        let sandbox = SandboxLayout::new(manifest.sandbox());
        let default_bin_dir = sandbox.default_bin_dir();
        Self {
            manifest,
            sandbox,
            resolver,
            installer,
            index_repo,
            metadata,
            bootstrap_repo,
            fs,
            default_bin_dir,
            events: Arc::new(NoopEventSink),
        }
    }

    /// Report progress to `events`
    pub fn with_events(mut self, events: Arc<dyn ReconcileEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Bin directory used when `InstallOptions::bin_dir` is unset
    pub fn with_default_bin_dir(mut self, bin_dir: PathBuf) -> Self {
        self.default_bin_dir = bin_dir;
        self
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn sandbox(&self) -> &SandboxLayout {
        &self.sandbox
    }

    fn emit(&self, event: ReconcileEvent) {
        self.events.on_event(event);
    }

    fn emit_detail(&self, event: ReconcileEvent) {
        if self.events.wants_detailed_events() {
            self.events.on_event(event);
        }
    }

    /// Packages currently in the cache. Never cached between calls.
    pub fn installed(&self) -> BundleResult<Vec<InstalledPackageRecord>> {
        let cache_dir = self.sandbox.cache_dir();
        let names = self.fs.list_dir(&cache_dir)?;
        let index = self.index_repo.load_or_new(&self.sandbox.install_index());
        Ok(index_installed(names, &cache_dir, &index))
    }

    /// Fetch missing packages.
    ///
    /// Makes no resolver call when every declared requirement is satisfied
    /// by an installed package. A resolver that finds no consistent
    /// assignment yields `VersionConflict` and the sandbox is untouched.
    pub fn fetch(&self) -> BundleResult<FetchOutcome> {
        let requirements = self.manifest.requirements();
        let installed = self.installed()?;
        let missing = unsatisfied(&requirements, &installed);

        if missing.is_empty() {
            tracing::debug!(requirements = requirements.len(), "all requirements satisfied");
            self.emit_detail(ReconcileEvent::FetchSkipped {
                requirement_count: requirements.len(),
            });
            return Ok(FetchOutcome::AlreadySatisfied);
        }

        let missing_names: Vec<String> = missing.iter().map(|req| req.to_string()).collect();
        tracing::info!(missing = ?missing_names, "resolving dependencies");
        self.emit_detail(ReconcileEvent::Resolving {
            unsatisfied: missing_names,
            source_count: self.manifest.sources().len(),
        });

        let bundle = self
            .resolver
            .resolve(self.manifest.sources(), &requirements)
            .map_err(BundleError::collaborator)?
            .ok_or_else(|| BundleError::VersionConflict {
                unresolved: requirements.iter().map(unresolved).collect(),
            })?;

        bundle
            .download(self.sandbox.root())
            .map_err(BundleError::collaborator)?;

        let fetched = bundle.packages().to_vec();
        self.record_fetched(&fetched)?;
        self.emit_detail(ReconcileEvent::Downloaded {
            packages: fetched.clone(),
        });

        Ok(FetchOutcome::Fetched(fetched))
    }

    /// Record archive identity and hash for freshly downloaded packages
    fn record_fetched(&self, fetched: &[PackageId]) -> BundleResult<()> {
        let index_path = self.sandbox.install_index();
        let mut index = self.index_repo.load_or_new(&index_path);

        for id in fetched {
            let archive = self.sandbox.archive(id);
            if !self.fs.exists(&archive) {
                tracing::warn!(package = %id, path = %archive.display(), "bundle did not produce archive");
                continue;
            }
            let hash = self.fs.hash(&archive)?;
            let file_name = id.archive_file_name();
            let unchanged = index
                .get(&file_name)
                .is_some_and(|entry| entry.id() == id && entry.hash() == &hash);
            if !unchanged {
                index.record(
                    file_name,
                    IndexEntry::new(id.clone(), hash).with_fetched_at(Utc::now()),
                );
            }
        }

        self.index_repo.save(&index, &index_path)?;
        Ok(())
    }

    /// Fetch, install, clean up, and regenerate every artifact.
    ///
    /// Holds the sandbox lock for the whole sequence.
    pub fn install(&self, options: &InstallOptions) -> BundleResult<InstallReport> {
        self.check_environment_names()?;
        let _lock = SandboxLock::acquire(self.sandbox.root())?;

        let fetch = self.fetch()?;

        let bin_dir = options
            .bin_dir
            .clone()
            .unwrap_or_else(|| self.default_bin_dir.clone());
        self.installer
            .install(&bin_dir)
            .map_err(BundleError::collaborator)?;
        self.emit_detail(ReconcileEvent::Installed {
            bin_dir: bin_dir.clone(),
        });

        let cleanup = self.cleanup_removed_packages()?;
        let environments = self.generate_load_path_files()?;
        let loader_shim = self.generate_loader_override()?;

        self.emit(ReconcileEvent::Done {
            fetched: fetch.fetched().len(),
            removed: cleanup.removed.len(),
            environments: environments.len(),
        });
        tracing::info!(
            fetched = fetch.fetched().len(),
            removed = cleanup.removed.len(),
            environments = environments.len(),
            "install complete"
        );

        Ok(InstallReport {
            fetch,
            bin_dir,
            cleanup,
            environments,
            loader_shim,
        })
    }

    /// Delete every installed package absent from the unrestricted resolved
    /// view: its archive(s), metadata file, install tree and index entry.
    ///
    /// Missing files are fine; other failures are reported, not raised.
    pub fn cleanup_removed_packages(&self) -> BundleResult<CleanupReport> {
        let required = self.resolve_for_environment(None)?;
        let installed = self.installed()?;
        let stale = detect_stale(&installed, &required);

        let mut report = CleanupReport::default();
        if stale.is_empty() {
            return Ok(report);
        }

        let index_path = self.sandbox.install_index();
        let mut index = self.index_repo.load_or_new(&index_path);

        for record in stale {
            let id = record.id();
            let mut files = vec![self.sandbox.archive(id)];
            if record.archive() != files[0] {
                files.push(record.archive().to_path_buf());
            }
            for archive_name in index.forget(id) {
                let path = self.sandbox.cache_dir().join(archive_name);
                if !files.contains(&path) {
                    files.push(path);
                }
            }
            files.push(self.sandbox.metadata(id));

            for file in &files {
                self.remove_best_effort(file, false, &mut report);
            }
            self.remove_best_effort(&self.sandbox.install_dir(id), true, &mut report);

            tracing::info!(package = %id, "removed package no longer in manifest");
            self.emit_detail(ReconcileEvent::PackageRemoved { id: id.clone() });
            report.removed.push(id.clone());
        }

        self.index_repo.save(&index, &index_path)?;
        Ok(report)
    }

    fn remove_best_effort(&self, path: &Path, is_dir: bool, report: &mut CleanupReport) {
        let result = if is_dir {
            self.fs.remove_dir_all(path)
        } else {
            self.fs.remove(path)
        };

        match result {
            Ok(()) => tracing::debug!(path = %path.display(), "deleted"),
            Err(err) if err.is_not_found() => {}
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "could not delete stale artifact");
                self.emit(ReconcileEvent::RemovalFailed {
                    path: path.to_path_buf(),
                    error: err.to_string(),
                });
                report.failures.push((path.to_path_buf(), err.to_string()));
            }
        }
    }

    /// Concrete specs for the dependencies visible in `environment`
    /// (`None` = every dependency), resolved against the sandbox's own
    /// metadata, in resolver order.
    pub fn resolve_for_environment(
        &self,
        environment: Option<&Environment>,
    ) -> BundleResult<Vec<ResolvedPackageSpec>> {
        let requirements: Vec<Requirement> = select(self.manifest.dependencies(), environment)
            .into_iter()
            .map(|dep| dep.to_requirement())
            .collect();
        let candidates = self.metadata.load(&self.sandbox.specifications_dir())?;

        resolve(&requirements, &candidates)
            .map_err(|unresolved| BundleError::VersionConflict { unresolved })
    }

    /// Write one bootstrap per environment and drop bootstraps of
    /// environments the manifest no longer declares.
    pub fn generate_load_path_files(&self) -> BundleResult<Vec<EnvironmentReport>> {
        let marker = self.manifest.bootstrap_marker();
        let emitter = LoadPathEmitter::new(&self.sandbox, &marker, &self.bootstrap_repo, &self.fs);
        let environments = all_environments(self.manifest.dependencies());
        self.check_environment_names()?;

        let mut reports = Vec::with_capacity(environments.len());
        for environment in &environments {
            let specs = self.resolve_for_environment(Some(environment))?;
            let path = emitter.emit_environment(environment, &specs)?;
            self.emit_detail(ReconcileEvent::EnvironmentWritten {
                environment: environment.clone(),
                path: path.clone(),
                package_count: specs.len(),
            });
            reports.push(EnvironmentReport {
                environment: environment.clone(),
                path,
                packages: specs.iter().map(|spec| spec.id().clone()).collect(),
            });
        }

        emitter.prune(&environments)?;
        Ok(reports)
    }

    /// Every declared environment must name a file inside `environments/`
    fn check_environment_names(&self) -> BundleResult<()> {
        for environment in all_environments(self.manifest.dependencies()) {
            Environment::parse(environment.as_str())?;
        }
        Ok(())
    }

    /// Write the loader shim shared by every environment
    pub fn generate_loader_override(&self) -> BundleResult<PathBuf> {
        let marker = self.manifest.bootstrap_marker();
        let emitter = LoadPathEmitter::new(&self.sandbox, &marker, &self.bootstrap_repo, &self.fs);
        let path = emitter.emit_loader_shim()?;
        self.emit_detail(ReconcileEvent::LoaderShimWritten { path: path.clone() });
        Ok(path)
    }
}

fn unresolved(requirement: &Requirement) -> UnresolvedDependency {
    UnresolvedDependency::new(requirement.name(), requirement.version_req().to_string())
}
