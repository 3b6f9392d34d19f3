//! Configuration module for bundlebox
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (BUNDLEBOX_*)
//! 3. Project config (.bundlebox/config.toml)
//! 4. User config (~/.config/bundlebox/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{apply_overrides, PROJECT_CONFIG_FILE};
pub use types::{Config, InstallConfig, OutputConfig, OutputFormat, RuntimeConfig, Verbosity};
