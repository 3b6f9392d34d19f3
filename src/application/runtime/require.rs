//! require_all - locate the require files of an active environment

use std::path::{Path, PathBuf};

use crate::domain::entities::DependencySpec;
use crate::domain::services::select;
use crate::error::{BundleError, BundleResult};

use super::registry::ActiveBootstrap;

/// Extensions tried for a require file given without one
pub const DEFAULT_REQUIRE_EXTENSIONS: &[&str] = &["rb"];

/// One require file and where it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredFile {
    pub dependency: String,
    pub file: String,
    pub path: PathBuf,
}

/// Resolve every require file of the dependencies visible in the active
/// environment, in declaration order. The first search path entry holding
/// the file wins.
pub fn require_all<S: AsRef<str>>(
    active: &ActiveBootstrap,
    dependencies: &[DependencySpec],
    extensions: &[S],
) -> BundleResult<Vec<RequiredFile>> {
    let mut required = Vec::new();

    for dep in select(dependencies, Some(&active.environment)) {
        for file in dep.require_files() {
            let path = locate(&active.search_path, file, extensions).ok_or_else(|| {
                BundleError::RequireNotFound {
                    dependency: dep.name().to_string(),
                    file: file.clone(),
                }
            })?;
            tracing::debug!(dependency = dep.name(), file = %path.display(), "required");
            required.push(RequiredFile {
                dependency: dep.name().to_string(),
                file: file.clone(),
                path,
            });
        }
    }

    Ok(required)
}

fn locate<S: AsRef<str>>(search_path: &[PathBuf], file: &str, extensions: &[S]) -> Option<PathBuf> {
    let has_extension = Path::new(file).extension().is_some();
    search_path.iter().find_map(|dir| {
        if has_extension {
            let candidate = dir.join(file);
            return candidate.is_file().then_some(candidate);
        }
        extensions
            .iter()
            .map(|ext| dir.join(format!("{}.{}", file, ext.as_ref())))
            .find(|candidate| candidate.is_file())
    })
}
