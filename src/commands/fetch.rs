//! Fetch command handler

use anyhow::{Context, Result};

use bundlebox::application::FetchOutcome;
use bundlebox::infrastructure::SandboxLock;
use bundlebox::presentation::create_event_sink;

use super::ProjectContext;

/// Execute the fetch command
pub fn cmd_fetch(ctx: &ProjectContext) -> Result<()> {
    let reconciler = ctx
        .reconciler()
        .with_events(create_event_sink(&ctx.config, "fetch"));
    let _lock = SandboxLock::acquire(reconciler.sandbox().root())?;

    let outcome = reconciler.fetch().context("Fetch failed")?;

    if ctx.is_json() {
        println!(
            "{}",
            serde_json::json!({
                "event": "fetch_complete",
                "fetched": outcome.fetched().iter().map(|id| id.to_string()).collect::<Vec<_>>(),
            })
        );
        return Ok(());
    }

    match outcome {
        FetchOutcome::AlreadySatisfied => println!("All dependencies are already installed"),
        FetchOutcome::Fetched(ids) => {
            println!("Fetched {} packages", ids.len());
            for id in ids {
                println!("  {}", id);
            }
        }
    }
    Ok(())
}
