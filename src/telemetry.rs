use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber. Logs go to stderr; reports own stdout.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "linkedin_watch=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
