//! Telemetry helpers for structured logging.

/// Initialize tracing for the engine. Embedding applications usually install
/// their own subscriber; this helper installs an env-filtered default only
/// when none is set yet, so calling it is always safe.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
