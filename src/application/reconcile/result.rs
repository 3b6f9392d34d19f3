//! Reconcile results

use std::path::PathBuf;

use crate::domain::value_objects::{Environment, PackageId};

/// What `fetch` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Every requirement was already satisfied; nothing was resolved
    AlreadySatisfied,
    /// The resolver produced a bundle and it was downloaded
    Fetched(Vec<PackageId>),
}

impl FetchOutcome {
    /// Packages downloaded by this fetch
    pub fn fetched(&self) -> &[PackageId] {
        match self {
            FetchOutcome::AlreadySatisfied => &[],
            FetchOutcome::Fetched(ids) => ids,
        }
    }
}

/// What `cleanup_removed_packages` did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Packages whose artifacts were deleted
    pub removed: Vec<PackageId>,
    /// Artifacts that exist but could not be deleted
    pub failures: Vec<(PathBuf, String)>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One generated environment bootstrap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentReport {
    pub environment: Environment,
    pub path: PathBuf,
    pub packages: Vec<PackageId>,
}

/// Result of a full install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub fetch: FetchOutcome,
    pub bin_dir: PathBuf,
    pub cleanup: CleanupReport,
    pub environments: Vec<EnvironmentReport>,
    pub loader_shim: PathBuf,
}
