//! Diagnostic tracing for the simulator.
//!
//! Reports and rejected commands are emitted as `info`/`warn` events from the
//! simulator; the CLI prints reports to stdout on its own, so tracing output
//! stays on stderr.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`, falling back to `default_level` (e.g. `"warn"`).
/// Calling it more than once is harmless; later calls are ignored.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
