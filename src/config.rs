//! Configuration & Logging: `LOG_LEVEL` env var parsed into a `tracing`
//! filter directive, mirroring `main.py`'s `configure_logging()`.

use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";

/// Reads `LOG_LEVEL` (`DEBUG|INFO|WARNING|ERROR`, case-insensitive,
/// default `INFO`) and installs a global `tracing` subscriber with an
/// `EnvFilter` built from it. `WARNING` is mapped to `tracing`'s `warn`.
pub fn init_tracing() {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LEVEL.to_string());
    let directive = match level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "WARNING" | "WARN" => "warn",
        "ERROR" => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)))
        .with_target(false)
        .init();
}
