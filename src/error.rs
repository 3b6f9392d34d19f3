//! Error types for bundlebox
//!
//! Uses `thiserror` for library errors; the binary wraps them with `anyhow`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{FsError, InstallIndexError};
use crate::domain::value_objects::InvalidEnvironmentName;

/// Result type alias for bundlebox operations
pub type BundleResult<T> = Result<T, BundleError>;

/// Error produced by an external collaborator (resolver, bundle, installer).
///
/// Collaborator errors are passed through untouched.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A dependency that could not be given a consistent version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedDependency {
    pub name: String,
    pub requirement: String,
}

impl UnresolvedDependency {
    pub fn new(name: impl Into<String>, requirement: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requirement: requirement.into(),
        }
    }
}

impl fmt::Display for UnresolvedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.requirement)
    }
}

fn conflict_lines(unresolved: &[UnresolvedDependency]) -> String {
    unresolved
        .iter()
        .map(|dep| format!("  {}", dep))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Main error type for bundlebox operations
#[derive(Error, Debug)]
pub enum BundleError {
    /// No assignment of versions satisfies every requirement
    #[error("no compatible versions could be found for:\n{}", conflict_lines(.unresolved))]
    VersionConflict { unresolved: Vec<UnresolvedDependency> },

    /// Error raised by the resolver, a bundle download or the installer
    #[error("{0}")]
    Collaborator(#[source] CollaboratorError),

    /// Manifest file could not be parsed
    #[error("invalid manifest {file}: {message}")]
    Manifest { file: PathBuf, message: String },

    /// Tool configuration file could not be parsed
    #[error("invalid config {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Package metadata file could not be parsed
    #[error("invalid package metadata {file}: {message}")]
    Metadata { file: PathBuf, message: String },

    /// Bootstrap or loader shim artifact could not be parsed
    #[error("invalid bootstrap artifact {file}: {message}")]
    Bootstrap { file: PathBuf, message: String },

    /// Environment name cannot be mapped to a bootstrap file
    #[error(transparent)]
    InvalidEnvironment(#[from] InvalidEnvironmentName),

    /// Requested environment has no generated bootstrap artifact
    #[error("environment '{environment}' has no bootstrap at {path} - run `bundlebox install` first")]
    BootstrapMissing { environment: String, path: PathBuf },

    /// A different environment was already activated in this process
    #[error("environment '{active}' is already active; cannot activate '{requested}'")]
    AlreadyActivated { active: String, requested: String },

    /// A require file was not found on the effective search path
    #[error("cannot load '{file}' required by {dependency}")]
    RequireNotFound { dependency: String, file: String },

    /// Sandbox lock could not be acquired
    #[error("failed to lock sandbox {path}: {message}")]
    Lock { path: PathBuf, message: String },

    /// Repository locator could not be interpreted
    #[error("unsupported source '{locator}': {message}")]
    InvalidSource { locator: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BundleError {
    /// Wrap a collaborator failure without altering it
    pub fn collaborator(err: CollaboratorError) -> Self {
        BundleError::Collaborator(err)
    }

    /// Whether this error is a version conflict
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, BundleError::VersionConflict { .. })
    }
}

impl From<FsError> for BundleError {
    fn from(err: FsError) -> Self {
        BundleError::Io(err.into())
    }
}

impl From<InstallIndexError> for BundleError {
    fn from(err: InstallIndexError) -> Self {
        BundleError::Io(std::io::Error::other(err.to_string()))
    }
}
