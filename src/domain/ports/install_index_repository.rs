//! InstallIndexRepository port - persistence of the install index
//!
//! Lets the reconciler load/save `installed.toml` without knowing about
//! TOML serialization details.

use std::path::Path;

use crate::domain::entities::InstallIndex;

/// Result type for install index operations
pub type InstallIndexResult<T> = Result<T, InstallIndexError>;

/// Install index operation errors
#[derive(Debug)]
pub enum InstallIndexError {
    /// Invalid index format
    InvalidFormat(String),
    /// Written by an incompatible version of bundlebox
    VersionMismatch { found: u32, expected: u32 },
    /// I/O error
    Io(String),
}

impl std::fmt::Display for InstallIndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstallIndexError::InvalidFormat(msg) => {
                write!(f, "Invalid install index format: {}", msg)
            }
            InstallIndexError::VersionMismatch { found, expected } => write!(
                f,
                "install index format incompatible (found version {}, expected {})",
                found, expected
            ),
            InstallIndexError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for InstallIndexError {}

/// Abstract repository for install index persistence
pub trait InstallIndexRepository {
    /// Load the index, or an empty one if the file does not exist
    fn load(&self, path: &Path) -> InstallIndexResult<InstallIndex>;

    /// Load the index, falling back to an empty one on any error.
    ///
    /// The index only accelerates identity lookup; the cache directory stays
    /// authoritative, so a broken index is recoverable.
    fn load_or_new(&self, path: &Path) -> InstallIndex {
        match self.load(path) {
            Ok(index) => index,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable install index");
                InstallIndex::new()
            }
        }
    }

    /// Save the index
    fn save(&self, index: &InstallIndex, path: &Path) -> InstallIndexResult<()>;
}
