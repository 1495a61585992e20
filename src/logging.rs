use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Later calls keep the first
/// subscriber, so hosts and tests may call this freely.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
