//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Installs a `tracing` subscriber that writes to stderr.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Calling this
/// more than once is harmless; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
