//! Structured logging initialization.

use crate::error::AppResult;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directives when `RUST_LOG` is unset: quiet dependencies,
/// verbose sync layer.
const DEFAULT_DIRECTIVES: &str = "info,pulse=debug";

/// Initialize the tracing subscriber.
///
/// Output format follows the deployment: JSON when `RUST_ENV=production`,
/// compact human-readable otherwise. This client mostly logs connection
/// churn and query failures, so the development format stays single-line.
pub fn init_logging() -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let registry = tracing_subscriber::registry().with(filter);

    if production_env() {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_target(true))
            .init();
    }

    Ok(())
}

fn production_env() -> bool {
    std::env::var("RUST_ENV").is_ok_and(|v| v == "production")
}
