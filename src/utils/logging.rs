//! Logging initialization

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for the gateway binary.
///
/// Honors `RUST_LOG`, defaulting to `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
