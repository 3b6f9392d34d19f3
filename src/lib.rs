//! bundlebox - project-local package sandbox
//!
//! bundlebox reconciles a project's `Bundlebox.toml` against a sandbox
//! directory: it fetches missing packages from repository sources, installs
//! them, deletes packages the manifest no longer requires, and writes one
//! bootstrap artifact per environment plus a loader shim. A process then
//! activates one environment to get a search path pinned to the sandbox.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    activate, require_all, InstallOptions, InstallReport, LoadPathEmitter, LoaderShim,
    ManifestReconciler, ProcessRegistry,
};
pub use config::Config;
pub use domain::entities::{DependencySpec, Manifest, ResolvedPackageSpec};
pub use domain::value_objects::{Environment, LoadPath, PackageId};
pub use error::{BundleError, BundleResult};
