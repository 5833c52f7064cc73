// crates/engine_core/src/logging.rs

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "PURSE_LOG";

/// Installs the global tracing subscriber. Safe to call more than once;
/// later calls are ignored.
pub fn init(default_filter: &str, pretty: bool) {
    let filter = std::env::var(LOG_ENV).unwrap_or_else(|_| default_filter.to_string());
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = if pretty {
        fmt::layer().pretty().boxed()
    } else {
        fmt::layer().boxed()
    };
    let registry = tracing_subscriber::registry().with(filter).with(fmt_layer);
    let _ = registry.try_init();
}
