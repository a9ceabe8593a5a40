pub mod config;
pub mod error;

pub use config::{Config, LoggingConfig, ValidationResult, WeatherConfig};
pub use error::{ConfigError, NetworkError, ReqwestErrorExt};

use anyhow::Result;

/// Initialize tracing/logging; `RUST_LOG` takes precedence over `default_filter`
pub fn init_with_filter(default_filter: &str) -> Result<()> {
    let fallback = if default_filter.trim().is_empty() {
        "info"
    } else {
        default_filter
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("Widget weather core initialized");
    Ok(())
}
