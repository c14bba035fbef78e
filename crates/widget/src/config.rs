//! Widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LOCALPRICE_GATEWAY_URL` - Exchange-rate gateway endpoint
//!
//! ## Optional
//! - `LOCALPRICE_GEO_URL` - IP-geolocation endpoint (default: <https://ip2c.org/s>)
//! - `LOCALPRICE_BASE_CURRENCY` - Base display currency assumed when the host
//!   page does not report one (default: USD)
//! - `LOCALPRICE_SETTLE_DELAY_MS` - Wait after a navigation event before
//!   rerunning the workflow (default: 750)
//! - `LOCALPRICE_RATE_TTL_MS` - Lifetime of a cached exchange rate
//!   (default: 3600000, one hour)
//! - `LOCALPRICE_HTTP_TIMEOUT_MS` - Per-request timeout for both external
//!   endpoints (default: 10000)

use std::time::Duration;

use localprice_core::CurrencyCode;
use thiserror::Error;
use url::Url;

const DEFAULT_GEO_URL: &str = "https://ip2c.org/s";
const DEFAULT_BASE_CURRENCY: &str = "USD";
const DEFAULT_SETTLE_DELAY_MS: u64 = 750;
const DEFAULT_RATE_TTL_MS: u64 = 3_600_000;
const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Conversion-engine configuration.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// IP-geolocation endpoint (plain-text `1;code;nickname;name` protocol).
    pub geo_url: Url,
    /// Exchange-rate gateway endpoint (JSON POST).
    pub gateway_url: Url,
    /// Base display currency assumed when the page does not report one.
    pub default_base_currency: CurrencyCode,
    /// Wait after a navigation event before rerunning the workflow.
    pub settle_delay: Duration,
    /// Lifetime of a cached exchange rate.
    pub rate_ttl: Duration,
    /// Per-request timeout for the external endpoints.
    pub http_timeout: Duration,
}

impl WidgetConfig {
    /// Create a configuration with defaults for everything but the gateway.
    #[must_use]
    pub fn new(gateway_url: Url) -> Self {
        Self {
            geo_url: Url::parse(DEFAULT_GEO_URL).expect("default geolocation URL is valid"),
            gateway_url,
            default_base_currency: CurrencyCode::parse(DEFAULT_BASE_CURRENCY)
                .expect("default base currency is valid"),
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
            rate_ttl: Duration::from_millis(DEFAULT_RATE_TTL_MS),
            http_timeout: Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
        }
    }

    /// Replace the geolocation endpoint.
    #[must_use]
    pub fn with_geo_url(mut self, geo_url: Url) -> Self {
        self.geo_url = geo_url;
        self
    }

    /// Replace the assumed base display currency.
    #[must_use]
    pub fn with_default_base_currency(mut self, currency: CurrencyCode) -> Self {
        self.default_base_currency = currency;
        self
    }

    /// Replace the navigation settle delay.
    #[must_use]
    pub const fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// Replace the cached-rate lifetime.
    #[must_use]
    pub const fn with_rate_ttl(mut self, rate_ttl: Duration) -> Self {
        self.rate_ttl = rate_ttl;
        self
    }

    /// Replace the per-request HTTP timeout.
    #[must_use]
    pub const fn with_http_timeout(mut self, http_timeout: Duration) -> Self {
        self.http_timeout = http_timeout;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or any
    /// variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let gateway_url = parse_url("LOCALPRICE_GATEWAY_URL", &get_required_env("LOCALPRICE_GATEWAY_URL")?)?;
        let geo_url = parse_url(
            "LOCALPRICE_GEO_URL",
            &get_env_or_default("LOCALPRICE_GEO_URL", DEFAULT_GEO_URL),
        )?;
        let default_base_currency = CurrencyCode::parse(&get_env_or_default(
            "LOCALPRICE_BASE_CURRENCY",
            DEFAULT_BASE_CURRENCY,
        ))
        .map_err(|e| {
            ConfigError::InvalidEnvVar("LOCALPRICE_BASE_CURRENCY".to_owned(), e.to_string())
        })?;
        let settle_delay = parse_millis("LOCALPRICE_SETTLE_DELAY_MS", DEFAULT_SETTLE_DELAY_MS)?;
        let rate_ttl = parse_millis("LOCALPRICE_RATE_TTL_MS", DEFAULT_RATE_TTL_MS)?;
        let http_timeout = parse_millis("LOCALPRICE_HTTP_TIMEOUT_MS", DEFAULT_HTTP_TIMEOUT_MS)?;

        Ok(Self {
            geo_url,
            gateway_url,
            default_base_currency,
            settle_delay,
            rate_ttl,
            http_timeout,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse a URL-valued variable.
fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
}

/// Parse a millisecond-valued variable into a `Duration`.
fn parse_millis(key: &str, default: u64) -> Result<Duration, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string())),
        Err(_) => Ok(Duration::from_millis(default)),
    }
}
