use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// bundlebox - project-local package sandbox
#[derive(Parser, Debug)]
#[command(name = "bundlebox")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to Bundlebox.toml (default: discovered from the current directory)
    #[arg(long, global = true)]
    pub manifest: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch, install, clean up and regenerate every environment bootstrap
    Install {
        /// Directory for package executables
        #[arg(long)]
        bin_dir: Option<PathBuf>,
    },

    /// Fetch missing packages without installing them
    Fetch,

    /// Delete packages the manifest no longer requires
    Clean,

    /// List the environments declared by the manifest
    Environments,

    /// List the packages resolved for an environment (all when omitted)
    List {
        #[arg(long)]
        env: Option<String>,
    },

    /// Activate an environment and show its search path and require files
    Activate {
        #[arg(long, default_value = "default")]
        env: String,
    },
}
