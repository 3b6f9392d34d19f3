//! Shared command setup: manifest, config and output mode

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use bundlebox::config::{Config, ConfigWarning, OutputFormat, Verbosity};
use bundlebox::domain::entities::Manifest;
use bundlebox::infrastructure::repositories::MANIFEST_FILE;
use bundlebox::infrastructure::TomlManifestRepository;
use bundlebox::presentation::{create_reconciler, ConcreteReconciler};

use super::project_root::discover_project_root;

/// Everything a command needs to know about the project it runs in
pub struct ProjectContext {
    pub project_root: PathBuf,
    pub manifest: Manifest,
    pub config: Config,
}

impl ProjectContext {
    /// Locate and load the manifest and config. CLI flags override config.
    pub fn load(manifest: Option<&Path>, json: bool, verbose: u8) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        let manifest_path = match manifest {
            Some(path) => cwd.join(path),
            None => discover_project_root(&cwd).join(MANIFEST_FILE),
        };
        let project_root = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.clone());

        let (manifest, manifest_warnings) = TomlManifestRepository::new()
            .load(&manifest_path)
            .with_context(|| format!("Failed to load manifest {}", manifest_path.display()))?;
        print_warnings(&manifest_warnings);

        let (mut config, config_warnings) = Config::load_or_default(Some(&project_root));
        print_warnings(&config_warnings);

        if json {
            config.output.format = OutputFormat::Json;
        }
        match verbose {
            0 => {}
            1 => config.output.verbosity = Verbosity::Verbose,
            _ => config.output.verbosity = Verbosity::Debug,
        }

        Ok(Self {
            project_root,
            manifest,
            config,
        })
    }

    pub fn is_json(&self) -> bool {
        self.config.output.format == OutputFormat::Json
    }

    pub fn reconciler(&self) -> ConcreteReconciler {
        create_reconciler(self.manifest.clone(), &self.project_root, &self.config)
    }
}

fn print_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
}
