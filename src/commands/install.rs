//! Install command handler

use std::path::PathBuf;

use anyhow::{Context, Result};

use bundlebox::application::InstallOptions;
use bundlebox::presentation::create_event_sink;

use super::ProjectContext;

/// Execute the install command
pub fn cmd_install(ctx: &ProjectContext, bin_dir: Option<PathBuf>) -> Result<()> {
    let options = InstallOptions::new().with_bin_dir(bin_dir.map(|dir| ctx.project_root.join(dir)));
    let reconciler = ctx
        .reconciler()
        .with_events(create_event_sink(&ctx.config, "install"));

    let report = reconciler.install(&options).context("Install failed")?;

    if !ctx.is_json() && !report.cleanup.is_clean() {
        eprintln!(
            "warning: {} stale artifacts could not be removed",
            report.cleanup.failures.len()
        );
    }
    Ok(())
}
