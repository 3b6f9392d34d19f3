//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BundleResult;

use super::loader;
use super::ConfigWarning;

/// `[install]` section
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InstallConfig {
    /// Executable directory used when `--bin-dir` is not given.
    /// Relative paths are taken from the project root.
    #[serde(default)]
    pub bin_dir: Option<PathBuf>,
}

/// How command output is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Per-package progress lines
    pub fn is_verbose(self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::Debug)
    }
}

/// `[output]` section
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default)]
    pub verbosity: Verbosity,
}

/// `[runtime]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Extensions tried for require files given without one
    #[serde(default = "default_require_extensions")]
    pub require_extensions: Vec<String>,

    /// System-wide package store consulted after the sandbox
    #[serde(default)]
    pub ambient_store: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            require_extensions: default_require_extensions(),
            ambient_store: None,
        }
    }
}

fn default_require_extensions() -> Vec<String> {
    crate::application::DEFAULT_REQUIRE_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub install: InstallConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> BundleResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> BundleResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults, then apply
    /// environment overrides
    pub fn load_or_default(project_root: Option<&Path>) -> (Self, Vec<ConfigWarning>) {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (BUNDLEBOX_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::apply_overrides(self, |key| std::env::var(key).ok())
    }

    /// Configured bin dir, anchored at `project_root` when relative
    pub fn bin_dir(&self, project_root: &Path) -> Option<PathBuf> {
        self.install
            .bin_dir
            .as_ref()
            .map(|dir| project_root.join(dir))
    }
}
