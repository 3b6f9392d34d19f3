//! List command handler

use anyhow::{Context, Result};

use bundlebox::domain::value_objects::Environment;

use super::ProjectContext;

/// Execute the list command
pub fn cmd_list(ctx: &ProjectContext, env: Option<String>) -> Result<()> {
    let environment = env.as_deref().map(Environment::parse).transpose()?;
    let specs = ctx
        .reconciler()
        .resolve_for_environment(environment.as_ref())
        .context("Failed to resolve installed packages")?;

    if ctx.is_json() {
        let packages: Vec<_> = specs
            .iter()
            .map(|spec| {
                serde_json::json!({
                    "name": spec.name(),
                    "version": spec.version().to_string(),
                    "path": spec.full_install_path().display().to_string(),
                })
            })
            .collect();
        println!("{}", serde_json::json!({ "packages": packages }));
    } else {
        for spec in &specs {
            println!("{} {}", spec.name(), spec.version());
        }
    }
    Ok(())
}
