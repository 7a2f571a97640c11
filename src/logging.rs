use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Install a global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Returns an error if
/// a subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}
