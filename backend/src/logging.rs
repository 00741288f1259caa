//! Tracing subscriber setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Default filter directives for a `LOG_LEVEL` value such as `INFO`
pub fn default_directives(log_level: &str) -> String {
    let level = log_level.trim().to_lowercase();
    format!(
        "coffee_tasting={level},coffee_tasting_server={level},tower_http={level},sqlx=warn"
    )
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `LOG_LEVEL`. Production emits JSON lines.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
