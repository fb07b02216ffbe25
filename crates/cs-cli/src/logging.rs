use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr so stdout stays a clean result protocol.
/// Repeated calls are harmless.
pub(crate) fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
