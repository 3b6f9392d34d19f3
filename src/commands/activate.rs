//! Activate command handler
//!
//! Activates one environment in this process and reports what a program
//! running under it would see: the effective search path and where each
//! require file resolves.

use anyhow::{Context, Result};

use bundlebox::application::{activate, require_all, LoaderShim, ProcessRegistry};
use bundlebox::domain::ports::PackageLoader;
use bundlebox::domain::value_objects::Environment;
use bundlebox::infrastructure::{
    AmbientLoader, SandboxLayout, TomlBootstrapRepository, TomlMetadataIndex,
};

use super::ProjectContext;

/// Execute the activate command
pub fn cmd_activate(ctx: &ProjectContext, env: &str) -> Result<()> {
    let sandbox = SandboxLayout::new(ctx.manifest.sandbox());
    let bootstrap_repo = TomlBootstrapRepository::new();
    let registry = ProcessRegistry::global();
    let ambient = AmbientLoader::new(ctx.config.runtime.ambient_store.clone());
    let ambient_path = ambient.ambient_path()?;
    let environment = Environment::parse(env)?;

    let active = activate(
        registry,
        &bootstrap_repo,
        &sandbox,
        &environment,
        &ambient_path,
    )?;
    let required = require_all(
        active,
        ctx.manifest.dependencies(),
        ctx.config.runtime.require_extensions.as_slice(),
    )?;
    let shim = LoaderShim::load(
        &bootstrap_repo,
        &sandbox,
        ambient,
        TomlMetadataIndex::new(),
        registry,
    )
    .context("Failed to load loader shim")?;

    let mut packages = Vec::new();
    for file in &required {
        let version = shim
            .find(&file.dependency)?
            .map(|spec| spec.version().to_string());
        packages.push((file, version));
    }

    if ctx.is_json() {
        let required: Vec<_> = packages
            .iter()
            .map(|(file, version)| {
                serde_json::json!({
                    "dependency": file.dependency,
                    "version": version,
                    "file": file.file,
                    "path": file.path.display().to_string(),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::json!({
                "environment": active.environment.as_str(),
                "search_path": active.search_path.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
                "required": required,
            })
        );
        return Ok(());
    }

    println!("Environment: {}", active.environment);
    println!("Search path:");
    for entry in &active.search_path {
        println!("  {}", entry.display());
    }
    println!("Required:");
    for (file, version) in &packages {
        println!(
            "  {} ({}) {}",
            file.file,
            version.as_deref().unwrap_or("ambient"),
            file.path.display()
        );
    }
    Ok(())
}
