// Diagnostic logging to stderr via `tracing`.

use tracing::Level;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events follow the `-v` flags. Everything else stays at WARN.
const TARGETS: [&str; 2] = ["grm_test", "grm_fst"];

/// Level for our own targets at the given `-v` count.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Build the target filter for the given `-v` count.
pub fn filter(verbosity: u8) -> Targets {
    let level = level_for(verbosity);
    Targets::new()
        .with_default(LevelFilter::WARN)
        .with_targets(TARGETS.into_iter().map(|target| (target, level)))
}

/// Install the stderr subscriber.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init(verbosity: u8) {
    let stderr_log_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_filter(filter(verbosity));

    if tracing_subscriber::registry()
        .with(stderr_log_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}
