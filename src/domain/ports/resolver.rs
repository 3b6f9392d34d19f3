//! Resolver port - remote dependency resolution and download
//!
//! The reconciler never resolves versions across repositories itself. It
//! hands the manifest's sources and requirements to a `Resolver` and, when
//! a consistent assignment exists, asks the returned `Bundle` to populate
//! the sandbox cache.

use std::path::Path;

use crate::domain::entities::Requirement;
use crate::domain::value_objects::{PackageId, RepositoryLocator};
use crate::error::CollaboratorError;

/// A consistent assignment of concrete versions to a requirement list
pub trait Bundle {
    /// Packages making up the bundle, in resolution order
    fn packages(&self) -> &[PackageId];

    /// Copy the bundle's archives and metadata into the sandbox rooted at
    /// `destination` (`cache/` and `specifications/`).
    fn download(&self, destination: &Path) -> Result<(), CollaboratorError>;
}

/// Resolves requirements against an ordered list of repositories
pub trait Resolver {
    /// `Ok(None)` means no consistent assignment exists.
    fn resolve(
        &self,
        sources: &[RepositoryLocator],
        requirements: &[Requirement],
    ) -> Result<Option<Box<dyn Bundle>>, CollaboratorError>;
}
