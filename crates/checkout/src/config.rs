//! Checkout configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LUMEN_BACKEND_URL` - Base URL of the order backend
//!
//! ## Optional
//! - `LUMEN_CART_PATH` - Path of the durable cart slot (default:
//!   `lumen-cart.json`)
//! - `LUMEN_GATEWAY_DISPLAY_NAME` - Merchant name shown in the gateway
//!   modal (default: `Lumen`)
//! - `LUMEN_GATEWAY_THEME_COLOR` - Hex color for the gateway modal theme

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Checkout subsystem configuration.
///
/// No secrets live client-side: the gateway key id arrives per-order from
/// the backend, and the key secret never leaves the backend at all.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Base URL of the order backend.
    pub backend_url: Url,
    /// Path of the durable cart slot.
    pub cart_path: PathBuf,
    /// Merchant name shown in the gateway modal.
    pub gateway_display_name: String,
    /// Optional hex color for the gateway modal theme.
    pub gateway_theme_color: Option<String>,
}

impl CheckoutConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend_url = get_required_env("LUMEN_BACKEND_URL")?
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("LUMEN_BACKEND_URL".to_owned(), e.to_string()))?;
        let cart_path = PathBuf::from(get_env_or_default("LUMEN_CART_PATH", "lumen-cart.json"));
        let gateway_display_name = get_env_or_default("LUMEN_GATEWAY_DISPLAY_NAME", "Lumen");
        let gateway_theme_color = get_optional_env("LUMEN_GATEWAY_THEME_COLOR");

        Ok(Self {
            backend_url,
            cart_path,
            gateway_display_name,
            gateway_theme_color,
        })
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_var_is_an_error() {
        // Fresh process env; the variable is not set in CI.
        let result = get_required_env("LUMEN_TEST_UNSET_VARIABLE");
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
    }

    #[test]
    fn test_default_applies_when_unset() {
        let value = get_env_or_default("LUMEN_TEST_UNSET_VARIABLE", "fallback");
        assert_eq!(value, "fallback");
    }

    #[test]
    fn test_optional_is_none_when_unset() {
        assert!(get_optional_env("LUMEN_TEST_UNSET_VARIABLE").is_none());
    }
}
