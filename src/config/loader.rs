//! Configuration loading

use std::path::{Path, PathBuf};

use crate::domain::value_objects::warnings_for_unknown_keys;
use crate::error::{BundleError, BundleResult};

use super::types::{Config, OutputFormat, Verbosity};
use super::ConfigWarning;

/// Project config location, relative to the project root
pub const PROJECT_CONFIG_FILE: &str = ".bundlebox/config.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> BundleResult<(Config, Vec<ConfigWarning>)> {
    let content = std::fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| BundleError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok((config, warnings_for_unknown_keys(&content, path, unknown_paths)))
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_root: Option<&Path>) -> (Config, Vec<ConfigWarning>) {
    let candidates = project_root
        .map(|root| root.join(PROJECT_CONFIG_FILE))
        .into_iter()
        .chain(user_config_file());

    for path in candidates {
        if !path.is_file() {
            continue;
        }
        match load_with_warnings(&path) {
            Ok((config, warnings)) => {
                tracing::debug!(path = %path.display(), "loaded config");
                return (config.with_env_overrides(), warnings);
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable config");
            }
        }
    }

    (Config::default().with_env_overrides(), Vec::new())
}

/// Apply BUNDLEBOX_* overrides, reading variables through `lookup`
pub fn apply_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    // BUNDLEBOX_BIN_DIR
    if let Some(bin_dir) = lookup("BUNDLEBOX_BIN_DIR").filter(|v| !v.is_empty()) {
        config.install.bin_dir = Some(PathBuf::from(bin_dir));
    }

    // BUNDLEBOX_VERBOSITY
    if let Some(verbosity) = lookup("BUNDLEBOX_VERBOSITY") {
        config.output.verbosity = match verbosity.to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        };
    }

    // BUNDLEBOX_FORMAT
    if let Some(format) = lookup("BUNDLEBOX_FORMAT") {
        config.output.format = match format.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        };
    }

    config
}

fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bundlebox").join("config.toml"))
}
