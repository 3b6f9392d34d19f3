//! Exclusive sandbox lock
//!
//! Mutation sequences (install, fetch, clean) hold an advisory `fs2` lock on
//! `<sandbox>/.bundlebox.lock`. A second process blocks until the first
//! releases it.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{BundleError, BundleResult};

use super::layout::LOCK_FILE;

/// Held for the duration of a mutation sequence; unlocks on drop
#[derive(Debug)]
pub struct SandboxLock {
    file: File,
    path: PathBuf,
}

impl SandboxLock {
    /// Block until the sandbox at `root` is exclusively ours
    pub fn acquire(root: &Path) -> BundleResult<Self> {
        let path = root.join(LOCK_FILE);
        let lock_err = |e: std::io::Error| BundleError::Lock {
            path: path.clone(),
            message: e.to_string(),
        };

        fs::create_dir_all(root).map_err(lock_err)?;
        let file = File::create(&path).map_err(lock_err)?;
        file.lock_exclusive().map_err(lock_err)?;

        tracing::debug!(path = %path.display(), "sandbox locked");
        Ok(Self { file, path })
    }

    /// Take the lock only if nobody else holds it
    #[cfg(test)]
    fn try_acquire(root: &Path) -> BundleResult<Option<Self>> {
        let path = root.join(LOCK_FILE);
        fs::create_dir_all(root)?;
        let file = File::create(&path)?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self { file, path })),
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => Ok(None),
            Err(e) => Err(BundleError::Lock {
                path,
                message: e.to_string(),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SandboxLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
