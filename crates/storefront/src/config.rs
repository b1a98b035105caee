//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: `http://localhost:3000`).
//!   An `https://` URL marks session cookies as secure.
//! - `STOREFRONT_CURRENCY` - ISO 4217 code used to format prices (default: USD)
//! - `STOREFRONT_CATALOG_PATH` - JSON product catalog; the bundled catalog is
//!   used when unset
//! - `STOREFRONT_ORDERS_PATH` - JSON order seed; the bundled orders are used
//!   when unset
//! - `STOREFRONT_SESSION_EXPIRY_SECS` - Idle session lifetime (default: 7 days)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use taharluxe_core::CurrencyCode;
use thiserror::Error;

/// Default idle session lifetime (7 days).
pub const DEFAULT_SESSION_EXPIRY_SECS: i64 = 7 * 24 * 60 * 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
    /// Optional catalog file overriding the bundled products
    pub catalog_path: Option<PathBuf>,
    /// Optional order seed overriding the bundled orders
    pub orders_path: Option<PathBuf>,
    /// Idle session lifetime in seconds
    pub session_expiry_secs: i64,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            currency: CurrencyCode::default(),
            catalog_path: None,
            orders_path: None,
            session_expiry_secs: DEFAULT_SESSION_EXPIRY_SECS,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let host = parse_env_or("STOREFRONT_HOST", defaults.host)?;
        let port = parse_env_or("STOREFRONT_PORT", defaults.port)?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", &defaults.base_url);
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_BASE_URL".to_string(),
                "must start with http:// or https://".to_string(),
            ));
        }
        let currency = parse_env_or("STOREFRONT_CURRENCY", defaults.currency)?;
        let catalog_path = get_optional_env("STOREFRONT_CATALOG_PATH").map(PathBuf::from);
        let orders_path = get_optional_env("STOREFRONT_ORDERS_PATH").map(PathBuf::from);
        let session_expiry_secs =
            parse_env_or("STOREFRONT_SESSION_EXPIRY_SECS", defaults.session_expiry_secs)?;
        if session_expiry_secs <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_SESSION_EXPIRY_SECS".to_string(),
                "must be positive".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            base_url,
            currency,
            catalog_path,
            orders_path,
            session_expiry_secs,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.currency, CurrencyCode::USD);
        assert!(!config.is_secure());
        assert_eq!(config.session_expiry_secs, DEFAULT_SESSION_EXPIRY_SECS);
    }

    #[test]
    fn test_is_secure_for_https() {
        let config = StorefrontConfig {
            base_url: "https://shop.example".to_string(),
            ..StorefrontConfig::default()
        };
        assert!(config.is_secure());
    }

    #[test]
    fn test_parse_env_or_uses_default_when_unset() {
        let port: u16 = parse_env_or("TAHARLUXE_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_value_reports_bad_value() {
        let err = parse_value::<u16>("STOREFRONT_PORT", "not-a-port").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_parse_value_currency() {
        let currency: CurrencyCode = parse_value("STOREFRONT_CURRENCY", "eur").unwrap();
        assert_eq!(currency, CurrencyCode::EUR);

        let err = parse_value::<CurrencyCode>("STOREFRONT_CURRENCY", "BTC").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid environment variable STOREFRONT_CURRENCY: unsupported currency code: BTC"
        );
    }
}
