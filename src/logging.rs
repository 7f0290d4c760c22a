//! Tracing setup shared by the binaries.
//!
//! `RUST_LOG` wins when set; otherwise `default_filter` is used.
//! `FACTLYZER_LOG_JSON=1` switches to JSON lines.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_FILTER: &str = "factlyzer=info,warn";
pub const ENV_LOG_JSON: &str = "FACTLYZER_LOG_JSON";

/// Install the global subscriber. A no-op if one is already installed
/// (e.g. by the Shuttle runtime or a previous call).
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let json = std::env::var(ENV_LOG_JSON).ok().is_some_and(|v| v == "1");

    let result = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init()
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
