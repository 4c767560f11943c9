use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;
use wxdash_weather::TemperatureUnit;

use crate::error::ConfigError;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Settings loaded from `config.toml`. Every section and field is optional.
///
/// `api` and `proxy` configure the forecast proxy that feeds the engine; the
/// comparison commands only validate them so one file serves both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream weather API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Proxy caching and rate limiting
    #[serde(default)]
    pub proxy: ProxyConfig,

    /// Display preferences
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Which public weather API the proxy forwards to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiType {
    #[default]
    Nws,
    OpenWeather,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub api_type: ApiType,

    /// Base URL of the upstream weather API
    pub api_url: String,

    /// Base URL of the wxdash proxy
    pub server_url: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,

    /// OpenWeather API key (optional, can be set via environment)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_type: ApiType::Nws,
            api_url: "https://api.weather.gov".to_string(),
            server_url: "http://localhost:3001".to_string(),
            timeout_ms: 10_000,
            api_key: std::env::var("OPENWEATHER_API_KEY").ok(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "default_cache_duration")]
    pub cache_duration_minutes: u32,
    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window_ms: u64,
    #[serde(default = "default_rate_limit_max")]
    pub rate_limit_max_requests: u32,
}

fn default_cache_duration() -> u32 {
    10
}

fn default_rate_limit_window() -> u64 {
    15 * 60 * 1000
}

fn default_rate_limit_max() -> u32 {
    50
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            cache_duration_minutes: default_cache_duration(),
            rate_limit_window_ms: default_rate_limit_window(),
            rate_limit_max_requests: default_rate_limit_max(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Unit temperatures are shown in
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,

    /// Include historical bands in comparison output
    #[serde(default = "default_show_historical_range")]
    pub show_historical_range: bool,
}

fn default_show_historical_range() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            temperature_unit: TemperatureUnit::default(),
            show_historical_range: default_show_historical_range(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    ///
    /// # Errors
    ///
    /// Fails if the config directory cannot be determined or the file
    /// cannot be read, written or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            tracing::info!("Wrote default configuration to {}", config_path.display());
            return Ok(config);
        }

        Ok(Self::load_from(&config_path)?)
    }

    /// Load configuration from an explicit path
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] or [`ConfigError::ParseError`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::NotFound(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration (default location or `path`) and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    ///
    /// # Errors
    ///
    /// Fails on load errors or when validation reports errors.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.api.api_url, "api.api_url", &mut result);
        self.validate_url(&self.api.server_url, "api.server_url", &mut result);

        if self.api.timeout_ms == 0 {
            result.add_error("api.timeout_ms", "Timeout must be greater than 0");
        } else if self.api.timeout_ms > 60_000 {
            result.add_warning("api.timeout_ms", "Timeout is more than 60 seconds");
        }

        if self.api.api_type == ApiType::OpenWeather
            && self.api.api_key.as_deref().map_or(true, str::is_empty)
        {
            result.add_warning(
                "api.api_key",
                "OpenWeather selected but no API key configured - requests will be rejected",
            );
        }

        if self.proxy.rate_limit_window_ms == 0 {
            result.add_error(
                "proxy.rate_limit_window_ms",
                "Rate limit window must be greater than 0",
            );
        }

        if self.proxy.rate_limit_max_requests == 0 {
            result.add_error(
                "proxy.rate_limit_max_requests",
                "Rate limit must allow at least one request",
            );
        }

        if self.proxy.cache_duration_minutes == 0 {
            result.add_warning("proxy.cache_duration_minutes", "Response caching disabled (0 minutes)");
        } else if self.proxy.cache_duration_minutes > 1440 {
            result.add_warning(
                "proxy.cache_duration_minutes",
                "Cache duration is more than 24 hours",
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.port() == Some(0) {
                    result.add_error(field_name, "Port cannot be 0");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `path`, creating parent directories
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("wxdash");

        Ok(config_dir.join("config.toml"))
    }
}
