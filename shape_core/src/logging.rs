//! Tracing setup for the `bodyshape` binary.
//!
//! Log lines go to stderr; stdout carries the analysis output (and JSON when
//! `--json` is given), so the two never mix.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the subscriber, quiet (`warn`) unless RUST_LOG says otherwise
pub fn init() {
    init_with_level("warn")
}

/// Install the subscriber with `default_level` as the fallback filter
///
/// RUST_LOG, when set, wins (e.g. `RUST_LOG=shape_core=debug` to trace
/// each classification).
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Debug-level subscriber routed through the test harness output
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
