//! MetadataIndex port - the on-disk package metadata store
//!
//! Distinct from the remote `Resolver`: it only knows what already sits in
//! a `specifications/` directory.

use std::path::Path;

use crate::domain::entities::ResolvedPackageSpec;
use crate::error::BundleResult;

pub trait MetadataIndex {
    /// Every spec found in `dir`, in file name order.
    ///
    /// A missing directory yields an empty list.
    fn load(&self, dir: &Path) -> BundleResult<Vec<ResolvedPackageSpec>>;

    /// A single metadata file
    fn read(&self, file: &Path) -> BundleResult<ResolvedPackageSpec>;
}
