//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `BOOKNEST_STORE` - Session store backend, `file` or `memory` (default: file)
//! - `BOOKNEST_DATA_DIR` - Directory holding the file store (default: .booknest)
//! - `BOOKNEST_LOG_FORMAT` - Log output, `pretty` or `json` (default: pretty)
//!
//! `RUST_LOG` controls log filtering and is read by the binary, not here.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Default directory for the file-backed store.
pub const DEFAULT_DATA_DIR: &str = ".booknest";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which key-value backend persists accounts and the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// JSON document on disk; survives restarts.
    #[default]
    File,
    /// Process memory; discarded on exit.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(format!("expected `file` or `memory`, got `{other}`")),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Session store backend
    pub store: StoreBackend,
    /// Directory for the file store
    pub data_dir: PathBuf,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_format: LogFormat::default(),
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
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set to a value
    /// that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store = parse_optional(&lookup, "BOOKNEST_STORE")?.unwrap_or_default();
        let log_format = parse_optional(&lookup, "BOOKNEST_LOG_FORMAT")?.unwrap_or_default();
        let data_dir = lookup("BOOKNEST_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        Ok(Self {
            store,
            data_dir,
            log_format,
        })
    }

    /// Path of the JSON document used by the file store.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, failing only when it is set but invalid.
fn parse_optional<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr<Err = String>,
{
    lookup(key)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e))
        })
        .transpose()
}
