//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BESTIE_API_BASE_URL` - Base URL of the store's REST API
//!   (e.g. `https://ecommercebackend-8gx8.onrender.com`). Two deployments of
//!   the API exist and neither is assumed, so this has no default.
//!
//! ## Optional
//! - `BESTIE_STATE_DIR` - Directory for local and session storage (default: `.bestie`)
//! - `BESTIE_CACHE_TTL_SECS` - Product cache lifetime in seconds (default: 300)
//! - `BESTIE_CACHE_CAPACITY` - Maximum cached entries (default: 1000)
//! - `BESTIE_HTTP_TIMEOUT_SECS` - Per-request timeout in seconds (default: none)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_STATE_DIR: &str = ".bestie";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_CACHE_CAPACITY: u64 = 1000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Remote API settings
    pub api: ApiConfig,
    /// Directory holding `local.json` and `session.json`
    pub state_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Remote REST API settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
    /// Optional per-request timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
    /// Lifetime of cached product and catalog responses
    pub cache_ttl: Duration,
    /// Maximum number of cached responses
    pub cache_capacity: u64,
}

impl ApiConfig {
    /// Settings for a base URL with default cache behaviour.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL is not an absolute
    /// http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: validate_base_url("BESTIE_API_BASE_URL", base_url)?,
            request_timeout: None,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        })
    }
}

impl StorefrontConfig {
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

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let base_url = env.required("BESTIE_API_BASE_URL")?;
        let mut api = ApiConfig::new(&base_url)?;
        api.cache_ttl = Duration::from_secs(
            env.parsed_or("BESTIE_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?,
        );
        api.cache_capacity = env.parsed_or("BESTIE_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY)?;
        api.request_timeout = env
            .parsed::<u64>("BESTIE_HTTP_TIMEOUT_SECS")?
            .map(Duration::from_secs);

        Ok(Self {
            api,
            state_dir: PathBuf::from(
                env.optional("BESTIE_STATE_DIR")
                    .unwrap_or_else(|| DEFAULT_STATE_DIR.to_string()),
            ),
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Path of the persistent local store.
    #[must_use]
    pub fn local_store_path(&self) -> PathBuf {
        self.state_dir.join("local.json")
    }

    /// Path of the session store.
    #[must_use]
    pub fn session_store_path(&self) -> PathBuf {
        self.state_dir.join("session.json")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Parse an optional variable.
    fn parsed<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key)
            .map(|value| {
                value
                    .trim()
                    .parse::<T>()
                    .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
            })
            .transpose()
    }

    /// Parse a variable with a default value.
    fn parsed_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        Ok(self.parsed(key)?.unwrap_or(default))
    }
}

/// Validate an API base URL and strip any trailing slash.
fn validate_base_url(key: &str, value: &str) -> Result<String, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "URL must have a host".to_string(),
        ));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}
