//! @dose
//! purpose: tracing subscriber setup for the binary. Library code only emits events.
//!
//! invariants:
//!     - RUST_LOG wins over the --verbose default
//!     - Log output goes to stderr so stdout stays machine-readable JSON

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let default_level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(default_level)
    });

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .try_init();
}
