//! BootstrapRepository port - persistence of generated runtime artifacts

use std::path::Path;

use crate::domain::entities::{BootstrapArtifact, LoaderShimArtifact};
use crate::error::BundleResult;

/// Reads and writes bootstrap artifacts.
///
/// Implementations must render identical artifacts to identical bytes.
pub trait BootstrapRepository {
    fn save_environment(&self, artifact: &BootstrapArtifact, path: &Path) -> BundleResult<()>;

    fn load_environment(&self, path: &Path) -> BundleResult<BootstrapArtifact>;

    fn save_loader_shim(&self, artifact: &LoaderShimArtifact, path: &Path) -> BundleResult<()>;

    fn load_loader_shim(&self, path: &Path) -> BundleResult<LoaderShimArtifact>;
}
