//! Install options

use std::path::PathBuf;

/// Options for `ManifestReconciler::install`
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Where package executables go (None = the reconciler's default)
    pub bin_dir: Option<PathBuf>,
}

impl InstallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the executable output directory
    pub fn with_bin_dir(mut self, bin_dir: Option<PathBuf>) -> Self {
        self.bin_dir = bin_dir;
        self
    }
}
