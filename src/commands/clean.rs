//! Clean command handler
//!
//! Removes packages no longer required by any environment.

use anyhow::{Context, Result};

use bundlebox::infrastructure::SandboxLock;
use bundlebox::presentation::create_event_sink;

use super::ProjectContext;

/// Execute the clean command
pub fn cmd_clean(ctx: &ProjectContext) -> Result<()> {
    let reconciler = ctx
        .reconciler()
        .with_events(create_event_sink(&ctx.config, "clean"));
    let _lock = SandboxLock::acquire(reconciler.sandbox().root())?;

    let report = reconciler
        .cleanup_removed_packages()
        .context("Cleanup failed")?;

    if ctx.is_json() {
        println!(
            "{}",
            serde_json::json!({
                "event": "clean_complete",
                "removed": report.removed.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
                "failures": report.failures.len(),
            })
        );
        return Ok(());
    }

    if report.removed.is_empty() {
        println!("Nothing to clean");
    }
    for id in &report.removed {
        println!("Removed {}", id);
    }
    for (path, error) in &report.failures {
        eprintln!("Could not remove {}: {}", path.display(), error);
    }
    Ok(())
}
