use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "info,user_server=debug";

/// Installs the global JSON subscriber. `RUST_LOG` overrides the default
/// filter; `log` records (actix `Logger`) are forwarded as well.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .json()
        .try_init();
}
