//! Archive Installer
//!
//! Unpacks cached `.pkg` archives (gzip-compressed tarballs) into
//! `gems/<name>-<version>/` and publishes each package's bin entries into
//! the requested bin directory.

use std::fs::{self, File};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::domain::entities::ResolvedPackageSpec;
use crate::domain::ports::{Installer, MetadataIndex};
use crate::error::CollaboratorError;
use crate::infrastructure::repositories::TomlMetadataIndex;
use crate::infrastructure::sandbox::SandboxLayout;

#[derive(Debug, Clone)]
pub struct ArchiveInstaller {
    sandbox: SandboxLayout,
    metadata: TomlMetadataIndex,
}

impl ArchiveInstaller {
    pub fn new(sandbox: SandboxLayout) -> Self {
        Self {
            sandbox,
            metadata: TomlMetadataIndex::new(),
        }
    }

    fn unpack(&self, spec: &ResolvedPackageSpec) -> Result<(), CollaboratorError> {
        let archive_path = self.sandbox.archive(spec.id());
        let target = spec.full_install_path();
        let gems_dir = self.sandbox.gems_dir();
        fs::create_dir_all(&gems_dir)?;

        // Unpack beside the target and rename, so a failed unpack never
        // leaves a tree that looks installed.
        let staging = tempfile::TempDir::new_in(&gems_dir)?;
        let decoder = GzDecoder::new(File::open(&archive_path)?);
        let mut archive = tar::Archive::new(decoder);
        archive.unpack(staging.path()).map_err(|e| {
            format!("failed to unpack {}: {}", archive_path.display(), e)
        })?;

        fs::rename(staging.path(), target)?;
        tracing::info!(package = %spec.id(), path = %target.display(), "installed");
        Ok(())
    }

    fn publish_bin_entries(
        &self,
        spec: &ResolvedPackageSpec,
        bin_dir: &Path,
    ) -> Result<usize, CollaboratorError> {
        let Some(package_bin) = spec.bin_dir() else {
            return Ok(0);
        };
        let source = spec.full_install_path().join(package_bin);
        if !source.is_dir() {
            return Ok(0);
        }

        fs::create_dir_all(bin_dir)?;
        let mut published = 0;
        for entry in fs::read_dir(&source)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let dest = bin_dir.join(entry.file_name());
            fs::copy(entry.path(), &dest)?;
            make_executable(&dest)?;
            published += 1;
        }
        Ok(published)
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(perms.mode() | 0o755);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

impl Installer for ArchiveInstaller {
    fn install(&self, bin_dir: &Path) -> Result<(), CollaboratorError> {
        let specs = self.metadata.load(&self.sandbox.specifications_dir())?;

        for spec in &specs {
            if !spec.full_install_path().is_dir() {
                if !self.sandbox.archive(spec.id()).is_file() {
                    tracing::warn!(package = %spec.id(), "metadata present but archive missing; skipping");
                    continue;
                }
                self.unpack(spec)?;
            }
            // Publish for every package, unpacked now or earlier
            let published = self.publish_bin_entries(spec, bin_dir)?;
            if published > 0 {
                tracing::debug!(package = %spec.id(), count = published, bin_dir = %bin_dir.display(), "published executables");
            }
        }

        Ok(())
    }
}
