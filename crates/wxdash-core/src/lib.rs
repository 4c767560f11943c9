pub mod app;
pub mod config;
pub mod error;

pub use app::{App, ComparisonRequest, DatedForecast, DayComparison, HistoricalRanges};
pub use config::{ApiConfig, ApiType, Config, DisplayConfig, ProxyConfig, ValidationResult};
pub use error::{AppError, ConfigError, InputError};

use anyhow::Result;

/// Initialize logging
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;

    tracing::debug!("wxdash core initialized");
    Ok(())
}
