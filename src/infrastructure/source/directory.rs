//! Directory Repository
//!
//! Resolves requirements against package repositories that are plain
//! directories laid out like a sandbox:
//!
//! ```text
//! <repo>/specifications/<name>-<version>.toml
//! <repo>/cache/<name>-<version>.pkg
//! ```
//!
//! Sources are consulted in declaration order; when two sources carry the
//! same `name-version`, the first one wins.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::entities::{Requirement, ResolvedPackageSpec};
use crate::domain::ports::file_system::FileSystem;
use crate::domain::ports::{Bundle, MetadataIndex, Resolver};
use crate::domain::services::resolve;
use crate::domain::value_objects::{PackageId, RepositoryLocator};
use crate::error::{BundleError, CollaboratorError};
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::repositories::TomlMetadataIndex;
use crate::infrastructure::sandbox::SandboxLayout;

/// Resolver over local directory repositories
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    /// Anchor for relative source paths (the manifest's directory)
    base: PathBuf,
    metadata: TomlMetadataIndex,
}

impl DirectoryRepository {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            metadata: TomlMetadataIndex::new(),
        }
    }

    /// Every fetchable package across `sources`, paired with the repository
    /// it comes from.
    fn candidates(
        &self,
        sources: &[RepositoryLocator],
    ) -> Result<Vec<(ResolvedPackageSpec, PathBuf)>, CollaboratorError> {
        let mut seen: HashSet<PackageId> = HashSet::new();
        let mut candidates = Vec::new();

        for source in sources {
            let root = source.local_path(&self.base).ok_or_else(|| BundleError::InvalidSource {
                locator: source.to_string(),
                message: "only local directories and file:// URLs are supported".to_string(),
            })?;
            let repo = SandboxLayout::new(&root);

            for spec in self.metadata.load(&repo.specifications_dir())? {
                if !repo.archive(spec.id()).is_file() {
                    tracing::warn!(
                        source = %source,
                        package = %spec.id(),
                        "metadata without archive; not fetchable"
                    );
                    continue;
                }
                if seen.insert(spec.id().clone()) {
                    candidates.push((spec, root.clone()));
                }
            }
        }

        Ok(candidates)
    }
}

impl Resolver for DirectoryRepository {
    fn resolve(
        &self,
        sources: &[RepositoryLocator],
        requirements: &[Requirement],
    ) -> Result<Option<Box<dyn Bundle>>, CollaboratorError> {
        let candidates = self.candidates(sources)?;
        let specs: Vec<ResolvedPackageSpec> =
            candidates.iter().map(|(spec, _)| spec.clone()).collect();

        let resolved = match resolve(requirements, &specs) {
            Ok(resolved) => resolved,
            Err(unresolved) => {
                tracing::debug!(?unresolved, "no consistent assignment across sources");
                return Ok(None);
            }
        };

        let mut packages = Vec::with_capacity(resolved.len());
        let mut origins = Vec::with_capacity(resolved.len());
        for spec in resolved {
            let origin = candidates
                .iter()
                .find(|(candidate, _)| candidate.id() == spec.id())
                .map(|(_, root)| root.clone())
                .unwrap_or_default();
            packages.push(spec.id().clone());
            origins.push(origin);
        }

        Ok(Some(Box::new(DirectoryBundle {
            packages,
            origins,
            fs: LocalFs::new(),
        })))
    }
}

/// Bundle produced by `DirectoryRepository`
#[derive(Debug)]
pub struct DirectoryBundle {
    packages: Vec<PackageId>,
    /// Repository root for each entry of `packages`
    origins: Vec<PathBuf>,
    fs: LocalFs,
}

impl DirectoryBundle {
    fn copy(&self, from: &Path, to: &Path) -> Result<(), CollaboratorError> {
        let bytes = std::fs::read(from)?;
        self.fs.write_bytes(to, &bytes)?;
        Ok(())
    }
}

impl Bundle for DirectoryBundle {
    fn packages(&self) -> &[PackageId] {
        &self.packages
    }

    fn download(&self, destination: &Path) -> Result<(), CollaboratorError> {
        let sandbox = SandboxLayout::new(destination);

        for (id, origin) in self.packages.iter().zip(&self.origins) {
            let repo = SandboxLayout::new(origin);
            let mut copied = false;
            for (from, to) in [
                (repo.archive(id), sandbox.archive(id)),
                (repo.metadata(id), sandbox.metadata(id)),
            ] {
                if self.fs.exists(&to) {
                    continue;
                }
                self.copy(&from, &to)?;
                copied = true;
            }

            if copied {
                tracing::info!(package = %id, from = %origin.display(), "fetched");
            } else {
                tracing::debug!(package = %id, "already cached");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::{Version, VersionReq};
    use tempfile::tempdir;

    fn publish(repo: &Path, name: &str, version: &str, extra: &str) {
        let layout = SandboxLayout::new(repo);
        let id = PackageId::new(name, Version::parse(version).unwrap());
        std::fs::create_dir_all(layout.specifications_dir()).unwrap();
        std::fs::create_dir_all(layout.cache_dir()).unwrap();
        std::fs::write(
            layout.metadata(&id),
            format!("name = \"{name}\"\nversion = \"{version}\"\n{extra}"),
        )
        .unwrap();
        std::fs::write(layout.archive(&id), format!("{name}-{version}")).unwrap();
    }

    fn req(name: &str, r: &str) -> Requirement {
        Requirement::new(name, VersionReq::parse(r).unwrap())
    }

    #[test]
    fn resolves_highest_version_with_dependencies() {
        let project = tempdir().unwrap();
        let repo = project.path().join("repo");
        publish(&repo, "a", "1.0.0", "[[dependencies]]\nname = \"b\"\n");
        publish(&repo, "b", "1.0.0", "");
        publish(&repo, "b", "1.4.0", "");

        let bundle = DirectoryRepository::new(project.path())
            .resolve(&[RepositoryLocator::new("repo")], &[req("a", "*")])
            .unwrap()
            .unwrap();

        let ids: Vec<String> = bundle.packages().iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["a@1.0.0", "b@1.4.0"]);
    }

    #[test]
    fn unsatisfiable_requirement_yields_none() {
        let project = tempdir().unwrap();
        publish(&project.path().join("repo"), "a", "1.0.0", "");

        let bundle = DirectoryRepository::new(project.path())
            .resolve(&[RepositoryLocator::new("repo")], &[req("a", ">=2.0.0")])
            .unwrap();
        assert!(bundle.is_none());
    }

    #[test]
    fn remote_sources_are_rejected() {
        let project = tempdir().unwrap();
        let result = DirectoryRepository::new(project.path()).resolve(
            &[RepositoryLocator::new("https://packages.example.org")],
            &[req("a", "*")],
        );
        let err = result.err().unwrap();
        assert!(err.to_string().contains("https://packages.example.org"));
    }

    #[test]
    fn download_copies_archive_and_metadata() {
        let project = tempdir().unwrap();
        publish(&project.path().join("repo"), "a", "1.0.0", "");
        let sandbox = project.path().join(".bundlebox");

        let bundle = DirectoryRepository::new(project.path())
            .resolve(&[RepositoryLocator::new("repo")], &[req("a", "*")])
            .unwrap()
            .unwrap();
        bundle.download(&sandbox).unwrap();

        let layout = SandboxLayout::new(&sandbox);
        let id = PackageId::new("a", Version::new(1, 0, 0));
        assert_eq!(std::fs::read_to_string(layout.archive(&id)).unwrap(), "a-1.0.0");
        assert!(layout.metadata(&id).is_file());
    }

    #[test]
    fn download_restores_metadata_missing_beside_cached_archive() {
        let project = tempdir().unwrap();
        publish(&project.path().join("repo"), "a", "1.0.0", "");
        let sandbox = project.path().join(".bundlebox");
        let layout = SandboxLayout::new(&sandbox);
        let id = PackageId::new("a", Version::new(1, 0, 0));
        std::fs::create_dir_all(layout.cache_dir()).unwrap();
        std::fs::write(layout.archive(&id), "cached").unwrap();

        DirectoryRepository::new(project.path())
            .resolve(&[RepositoryLocator::new("repo")], &[req("a", "*")])
            .unwrap()
            .unwrap()
            .download(&sandbox)
            .unwrap();

        assert_eq!(std::fs::read_to_string(layout.archive(&id)).unwrap(), "cached");
        assert!(layout.metadata(&id).is_file());
    }

    #[test]
    fn first_source_wins_for_identical_ids() {
        let project = tempdir().unwrap();
        publish(&project.path().join("first"), "a", "1.0.0", "");
        publish(&project.path().join("second"), "a", "1.0.0", "");
        std::fs::write(
            project.path().join("second").join("cache").join("a-1.0.0.pkg"),
            "from second",
        )
        .unwrap();
        let sandbox = project.path().join(".bundlebox");

        DirectoryRepository::new(project.path())
            .resolve(
                &[RepositoryLocator::new("first"), RepositoryLocator::new("second")],
                &[req("a", "*")],
            )
            .unwrap()
            .unwrap()
            .download(&sandbox)
            .unwrap();

        let archive = sandbox.join("cache").join("a-1.0.0.pkg");
        assert_eq!(std::fs::read_to_string(archive).unwrap(), "a-1.0.0");
    }
}
