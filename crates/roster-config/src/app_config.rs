//! Application configuration structures.

use roster_core::{RosterError, RosterResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Remote API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Retry configuration.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Validates the configuration and normalises the base URL.
    ///
    /// Fails with [`RosterError::Configuration`] when the base URL or API key
    /// is missing, or when the base URL is not an absolute URL.
    pub fn validate(&mut self) -> RosterResult<()> {
        self.api.validate()
    }
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "roster".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Remote user-directory API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL; resource paths such as `users` are appended to it verbatim.
    #[serde(default)]
    pub base_url: String,
    /// Static key sent in the `x-api-key` header.
    #[serde(default)]
    pub api_key: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Returns the request timeout as a Duration.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&mut self) -> RosterResult<()> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(RosterError::configuration("Cannot find base url"));
        }
        if self.api_key.trim().is_empty() {
            return Err(RosterError::configuration("Cannot find api key"));
        }

        Url::parse(base_url).map_err(|e| {
            RosterError::configuration(format!("Invalid base url '{}': {}", base_url, e))
        })?;

        let mut normalized = base_url.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        self.base_url = normalized;
        Ok(())
    }
}

/// Retry configuration for transient API failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Number of retries after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay before the first retry, in seconds.
    #[serde(default = "default_initial_delay_secs")]
    pub initial_delay_secs: u64,
    /// Factor applied to the delay for every further retry.
    #[serde(default = "default_multiplier")]
    pub multiplier: u32,
    /// Upper bound for a single delay, in seconds.
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_delay_secs() -> u64 {
    2
}

fn default_multiplier() -> u32 {
    2
}

fn default_max_delay_secs() -> u64 {
    60
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_secs: default_initial_delay_secs(),
            multiplier: default_multiplier(),
            max_delay_secs: default_max_delay_secs(),
        }
    }
}

impl RetryConfig {
    /// Returns the initial delay as a Duration.
    #[must_use]
    pub const fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_secs)
    }

    /// Returns the maximum delay as a Duration.
    #[must_use]
    pub const fn max_delay(&self) -> Duration {
        Duration::from_secs(self.max_delay_secs)
    }
}

/// Cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live of directory entries, in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl CacheConfig {
    /// Returns the TTL as a Duration.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}
