//! PackageLoader port - the lookup interface of a package loader
//!
//! Both the ambient (system-wide) loader and the sandbox's loader shim
//! answer the same question: which package metadata backs this name?

use std::path::PathBuf;

use crate::domain::entities::ResolvedPackageSpec;
use crate::error::BundleResult;

pub trait PackageLoader {
    /// Metadata for `name`, or `None` when the loader does not know it
    fn find(&self, name: &str) -> BundleResult<Option<ResolvedPackageSpec>>;

    /// Search path this loader consults, given the process search path
    fn search_path(&self, process_path: &[PathBuf]) -> Vec<PathBuf> {
        process_path.to_vec()
    }
}
