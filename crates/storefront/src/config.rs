//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MATECH_CATALOG_URL` - Base URL of the remote catalog API
//!   (default: `https://fakestoreapi.com`)
//! - `MATECH_DATA_DIR` - Directory for persisted cart state (default: `.matech`)
//! - `MATECH_IMPORT_LIMIT` - Maximum number of imported remote products
//!   (default: 3)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::catalog::ImportConfig;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Store application configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the remote catalog API
    pub catalog_base_url: String,
    /// Directory holding persisted cart state
    pub data_dir: PathBuf,
    /// Remote import settings
    pub import: ImportConfig,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog_base_url = validate_base_url(
            "MATECH_CATALOG_URL",
            &get_env_or_default("MATECH_CATALOG_URL", "https://fakestoreapi.com"),
        )?;
        let data_dir = PathBuf::from(get_env_or_default("MATECH_DATA_DIR", ".matech"));

        let mut import = ImportConfig::default();
        if let Some(raw) = get_optional_env("MATECH_IMPORT_LIMIT") {
            import.limit = raw.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidEnvVar("MATECH_IMPORT_LIMIT".to_string(), e.to_string())
            })?;
        }

        Ok(Self {
            catalog_base_url,
            data_dir,
            import,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Check that a base URL parses; stored as a string for the HTTP client.
fn validate_base_url(var_name: &str, raw: &str) -> Result<String, ConfigError> {
    Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    Ok(raw.to_string())
}
