//! CLI frontend for `autopatchelf-core`.
//!
//! The binary in `main.rs` only parses arguments; everything it runs lives here
//! so it can be exercised from tests.

pub mod commands;

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Map `-v`/`-q` counts to a default log filter.
///
/// `-q` wins over `-v`. `RUST_LOG` still overrides whatever this returns.
pub fn log_level(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

/// Install the stderr log subscriber. Safe to call more than once.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}
