use tracing_subscriber::EnvFilter;

/// Install the diagnostics subscriber. Diagnostics always go to stderr so
/// that stdout stays clean for the JSON report.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks debug over info.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "log_monitor=debug"
    } else {
        "log_monitor=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
