//! Tracing setup for the binary
//!
//! Logs go to stderr so stdout stays clean for `--json`.

use tracing_subscriber::EnvFilter;

/// Variable holding an `EnvFilter` directive; overrides `-v`
pub const LOG_ENV: &str = "BUNDLEBOX_LOG";

pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
