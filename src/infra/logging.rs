use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber once. Output goes to stderr: stdout is
/// reserved for JSON-RPC responses.
pub fn init(filter: &str) {
    let env_filter =
        EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(crate::infra::config::DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
