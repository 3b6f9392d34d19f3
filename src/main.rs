//! bundlebox CLI - project-local package sandbox
//!
//! Usage: bundlebox <COMMAND>
//!
//! Commands:
//!   install       Fetch, install, clean up and write environment bootstraps
//!   fetch         Fetch missing packages
//!   clean         Delete packages the manifest no longer requires
//!   environments  List declared environments
//!   list          List resolved packages
//!   activate      Show an environment's search path and require files

mod cli;
mod commands;
mod observability;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::ProjectContext;

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init_tracing(cli.verbose);

    let ctx = ProjectContext::load(cli.manifest.as_deref(), cli.json, cli.verbose)?;

    match cli.command {
        Commands::Install { bin_dir } => commands::cmd_install(&ctx, bin_dir),
        Commands::Fetch => commands::cmd_fetch(&ctx),
        Commands::Clean => commands::cmd_clean(&ctx),
        Commands::Environments => commands::cmd_environments(&ctx),
        Commands::List { env } => commands::cmd_list(&ctx, env),
        Commands::Activate { env } => commands::cmd_activate(&ctx, &env),
    }
}
