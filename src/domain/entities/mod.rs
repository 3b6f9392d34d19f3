//! Domain Entities
//!
//! - `Manifest` / `DependencySpec` - the project's declaration
//! - `InstalledPackageRecord` / `ResolvedPackageSpec` - concrete packages
//! - `InstallIndex` - persisted identity of fetched archives
//! - `BootstrapArtifact` / `LoaderShimArtifact` - generated runtime configuration

mod bootstrap;
mod dependency;
mod install_index;
mod manifest;
mod package;

pub use bootstrap::{BootstrapArtifact, LoaderShimArtifact, Registration, BOOTSTRAP_FORMAT_VERSION};
pub use dependency::{DependencySpec, Requirement};
pub use install_index::{IndexEntry, InstallIndex};
pub use manifest::{Manifest, DEFAULT_SANDBOX_DIR};
pub use package::{InstalledPackageRecord, ResolvedPackageSpec};
