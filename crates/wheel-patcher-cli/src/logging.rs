//! Log output for the CLI.
//!
//! Events go to stderr so command output on stdout stays clean. `RUST_LOG`
//! takes precedence over the `-v` flags.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Map the `-v` count to a default level.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber.
pub fn init(verbose: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for_verbosity(verbose).into())
        .from_env_lossy();

    // Ignore error if a subscriber is already set
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
