//! Pack API client configuration.

use url::Url;

use crate::retry::RetryPolicy;

/// Default pack API base URL.
pub const DEFAULT_API_URL: &str = "https://api.packstack.io";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`crate::PackClient`].
#[derive(Debug, Clone)]
pub struct PackApiConfig {
    /// Base URL of the pack API (the part before `/api/v1`).
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries for transient failures.
    pub retry: RetryPolicy,
}

impl PackApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PACKSTACK_API_URL`, falling back to `API_URL`
    ///   (default: `https://api.packstack.io`)
    /// - `PACKSTACK_TIMEOUT_SECS` (default: 30)
    /// - `PACKSTACK_MAX_RETRIES` (default: 3)
    pub fn from_env() -> Result<Self, ConfigError> {
        let (var, raw) = match std::env::var("PACKSTACK_API_URL") {
            Ok(v) => ("PACKSTACK_API_URL", v),
            Err(_) => match std::env::var("API_URL") {
                Ok(v) => ("API_URL", v),
                Err(_) => ("PACKSTACK_API_URL", DEFAULT_API_URL.to_string()),
            },
        };

        Ok(Self {
            base_url: parse_url(var, &raw)?,
            timeout_secs: std::env::var("PACKSTACK_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy {
                max_retries: std::env::var("PACKSTACK_MAX_RETRIES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(RetryPolicy::default().max_retries),
                ..RetryPolicy::default()
            },
        })
    }

    /// Configuration pointing at an explicit base URL with the default
    /// timeout and retry policy.
    pub fn with_base_url(raw: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("base_url", raw)?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry: RetryPolicy::default(),
        })
    }
}

fn parse_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            var.to_string(),
            "URL cannot be used as a base".to_string(),
        ));
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
