//! Package identity value object
//!
//! A package is identified by `(name, version)`. On disk the pair is encoded
//! as `<name>-<version>` in archive, metadata and install tree names.

use std::fmt;

use semver::Version;

/// Extension of cached package archives (gzip tarballs)
pub const ARCHIVE_EXTENSION: &str = "pkg";

/// Extension of package metadata files
pub const METADATA_EXTENSION: &str = "toml";

/// Exact identity of a concrete package
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageId {
    name: String,
    version: Version,
}

impl PackageId {
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// `<name>-<version>`
    pub fn full_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }

    /// `<name>-<version>.pkg`
    pub fn archive_file_name(&self) -> String {
        format!("{}.{}", self.full_name(), ARCHIVE_EXTENSION)
    }

    /// `<name>-<version>.toml`
    pub fn metadata_file_name(&self) -> String {
        format!("{}.{}", self.full_name(), METADATA_EXTENSION)
    }

    /// Parse `<name>-<version>`.
    ///
    /// The name may itself contain dashes; the version starts at the first
    /// dash whose remainder is a valid semantic version.
    pub fn parse_full_name(full_name: &str) -> Option<Self> {
        full_name
            .match_indices('-')
            .map(|(idx, _)| idx)
            .filter(|&idx| idx > 0)
            .find_map(|idx| {
                let version = Version::parse(&full_name[idx + 1..]).ok()?;
                Some(Self::new(&full_name[..idx], version))
            })
    }

    /// Parse a cache archive file name (`<name>-<version>.pkg`)
    pub fn parse_archive_file_name(file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(&format!(".{}", ARCHIVE_EXTENSION))?;
        Self::parse_full_name(stem)
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}
