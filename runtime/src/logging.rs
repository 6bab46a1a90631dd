use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging to stderr.
///
/// `RUST_LOG` takes precedence; otherwise `default_filter` is used.
///
/// ```no_run
/// keeper_runtime::init_logging("info");
/// ```
pub fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
