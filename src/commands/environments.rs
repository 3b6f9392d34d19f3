//! Environments command handler

use anyhow::Result;

use bundlebox::domain::services::all_environments;

use super::ProjectContext;

/// Execute the environments command
pub fn cmd_environments(ctx: &ProjectContext) -> Result<()> {
    let environments = all_environments(ctx.manifest.dependencies());

    if ctx.is_json() {
        let names: Vec<&str> = environments.iter().map(|env| env.as_str()).collect();
        println!("{}", serde_json::json!({ "environments": names }));
    } else {
        for env in &environments {
            println!("{}", env);
        }
    }
    Ok(())
}
