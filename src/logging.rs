//! Diagnostic output
//!
//! Events go to stderr so stdout carries only command output. `GROOT_LOG`
//! takes an `EnvFilter` directive and overrides the verbosity flag.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "GROOT_LOG";

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // a subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
