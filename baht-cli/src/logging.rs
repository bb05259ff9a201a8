use tracing_subscriber::{EnvFilter, fmt};

/// Log to stderr so stdout stays clean for JSON output. `RUST_LOG` wins over
/// `--verbose`; otherwise only warnings are shown.
pub fn setup_logging(verbose: bool) {
    let default = if verbose { "baht=debug,baht_ingest=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
