//! Application configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

use std::time::Duration;

/// Upstream timeout used when `CRMS_BACKEND_TIMEOUT_SECS` is unset or invalid
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 10;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the external authentication backend
    /// Example: http://localhost:8080
    pub backend_url: Option<String>,

    /// Upstream request timeout in seconds
    pub backend_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("CRMS_BACKEND_URL").ok(),
            std::env::var("CRMS_BACKEND_TIMEOUT_SECS").ok(),
        )
    }

    /// Build configuration from raw variable values
    pub fn from_vars(backend_url: Option<String>, backend_timeout: Option<String>) -> Self {
        let backend_url = backend_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let backend_timeout_secs = backend_timeout
            .and_then(|secs| secs.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_BACKEND_TIMEOUT_SECS);

        Self {
            backend_url,
            backend_timeout_secs,
        }
    }

    /// Check if the backend is configured
    pub fn has_backend(&self) -> bool {
        self.backend_url.is_some()
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
