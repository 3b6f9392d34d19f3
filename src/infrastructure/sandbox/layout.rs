//! Paths inside a sandbox
//!
//! ```text
//! <sandbox>/
//!   cache/<name>-<version>.pkg
//!   specifications/<name>-<version>.toml
//!   gems/<name>-<version>/
//!   environments/<env>.toml
//!   environments/loader-shim.toml
//!   installed.toml
//!   .bundlebox.lock
//! ```

use std::path::{Path, PathBuf};

use crate::domain::value_objects::{Environment, PackageId};

pub const CACHE_DIR: &str = "cache";
pub const SPECIFICATIONS_DIR: &str = "specifications";
pub const GEMS_DIR: &str = "gems";
pub const ENVIRONMENTS_DIR: &str = "environments";
pub const LOADER_SHIM_FILE: &str = "loader-shim.toml";
pub const INSTALL_INDEX_FILE: &str = "installed.toml";
pub const LOCK_FILE: &str = ".bundlebox.lock";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxLayout {
    root: PathBuf,
}

impl SandboxLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(CACHE_DIR)
    }

    pub fn specifications_dir(&self) -> PathBuf {
        self.root.join(SPECIFICATIONS_DIR)
    }

    pub fn gems_dir(&self) -> PathBuf {
        self.root.join(GEMS_DIR)
    }

    /// Bootstrap root: holds every environment artifact and the loader shim
    pub fn environments_dir(&self) -> PathBuf {
        self.root.join(ENVIRONMENTS_DIR)
    }

    pub fn default_bin_dir(&self) -> PathBuf {
        self.root.join("bin")
    }

    pub fn install_index(&self) -> PathBuf {
        self.root.join(INSTALL_INDEX_FILE)
    }

    pub fn lock_file(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }

    pub fn archive(&self, id: &PackageId) -> PathBuf {
        self.cache_dir().join(id.archive_file_name())
    }

    pub fn metadata(&self, id: &PackageId) -> PathBuf {
        self.specifications_dir().join(id.metadata_file_name())
    }

    pub fn install_dir(&self, id: &PackageId) -> PathBuf {
        self.gems_dir().join(id.full_name())
    }

    pub fn bootstrap(&self, environment: &Environment) -> PathBuf {
        self.environments_dir().join(environment.bootstrap_file_name())
    }

    pub fn loader_shim(&self) -> PathBuf {
        self.environments_dir().join(LOADER_SHIM_FILE)
    }
}
