//! Installer port - unpacks fetched archives into the sandbox

use std::path::Path;

use crate::error::CollaboratorError;

/// Installs whatever the last fetch placed in the sandbox cache
pub trait Installer {
    /// Unpack pending archives, placing executables in `bin_dir`
    fn install(&self, bin_dir: &Path) -> Result<(), CollaboratorError>;
}
