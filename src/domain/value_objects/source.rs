//! Repository locator value object
//!
//! Sources are kept in declaration order; the resolver consults them in that
//! order.

use std::fmt;
use std::path::{Path, PathBuf};

/// Location of a package repository (`file://` URL, plain path, or remote URL)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryLocator(String);

impl RepositoryLocator {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Scheme of the locator, if it is a URL
    pub fn scheme(&self) -> Option<&str> {
        self.0.split_once("://").map(|(scheme, _)| scheme)
    }

    /// Whether this locator names a directory on the local machine
    pub fn is_local(&self) -> bool {
        matches!(self.scheme(), None | Some("file"))
    }

    /// Local directory named by this locator, resolved against `base`
    ///
    /// Returns `None` for non-local schemes.
    pub fn local_path(&self, base: &Path) -> Option<PathBuf> {
        let raw = match self.scheme() {
            None => self.0.as_str(),
            Some("file") => &self.0["file://".len()..],
            Some(_) => return None,
        };
        let path = Path::new(raw);
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            Some(base.join(path))
        }
    }
}

impl fmt::Display for RepositoryLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RepositoryLocator {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
