//! Logging setup for the command-line tool
//!
//! Diagnostics go to stderr so stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter (e.g. `planarity=debug`)
pub const LOG_ENV: &str = "PLANARITY_LOG";

/// Filter level for the `-v` count, or `error` when quiet
pub fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the global subscriber
///
/// `PLANARITY_LOG`, then `RUST_LOG`, take precedence over the verbosity flags.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, quiet)));

    // A subscriber may already be installed (e.g. by a test harness)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
