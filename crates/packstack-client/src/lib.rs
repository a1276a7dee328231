//! # packstack-client: Typed Client for the Packstack Pack API
//!
//! Fetches the document behind a shared pack link:
//!
//! ```text
//! GET {base_url}/api/v1/pack/view/{id}
//! ```
//!
//! A 404 is not an error: [`PackClient::fetch_pack`] returns `Ok(None)` and
//! the caller renders its "not found" state. Connect failures, timeouts and
//! overload statuses are retried per [`RetryPolicy`]; any other non-2xx
//! status or an undecodable body is a typed [`PackApiError`].

pub mod config;
pub mod error;
pub mod retry;

pub use config::{ConfigError, PackApiConfig};
pub use error::PackApiError;
pub use retry::RetryPolicy;

use std::time::Duration;

use packstack_core::{PackData, PackId};

/// API version path segment.
const API_PREFIX: &str = "api/v1";

/// Client for the Packstack pack API.
#[derive(Debug, Clone)]
pub struct PackClient {
    http: reqwest::Client,
    base_url: url::Url,
    retry: RetryPolicy,
}

impl PackClient {
    /// Create a client from configuration.
    pub fn new(config: PackApiConfig) -> Result<Self, PackApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PackApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url,
            retry: config.retry,
        })
    }

    /// Fetch a shared pack by id.
    ///
    /// Calls `GET {base_url}/api/v1/pack/view/{id}`. Returns `Ok(None)` when
    /// the API answers 404 or the id is blank.
    pub async fn fetch_pack(&self, id: &PackId) -> Result<Option<PackData>, PackApiError> {
        if id.as_str().trim().is_empty() {
            return Ok(None);
        }

        let endpoint = format!("GET /pack/view/{id}");
        let url = self.pack_url(id)?;

        let resp = self
            .retry
            .send(|| self.http.get(url.clone()))
            .await
            .map_err(|e| PackApiError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(pack_id = %id, "pack not found upstream");
            return Ok(None);
        }

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(PackApiError::ApiError {
                endpoint,
                status,
                body,
            });
        }

        resp.json()
            .await
            .map(Some)
            .map_err(|e| PackApiError::Deserialization {
                endpoint,
                source: e,
            })
    }

    /// Build the view URL for `id`, percent-encoding the id as one path
    /// segment.
    fn pack_url(&self, id: &PackId) -> Result<url::Url, PackApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                PackApiError::Config(ConfigError::InvalidUrl(
                    self.base_url.to_string(),
                    "base URL cannot carry a path".into(),
                ))
            })?
            .pop_if_empty()
            .extend(API_PREFIX.split('/'))
            .extend(["pack", "view", id.as_str()]);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> PackClient {
        let mut config = PackApiConfig::with_base_url(base).unwrap();
        config.retry = RetryPolicy::none();
        PackClient::new(config).unwrap()
    }

    #[test]
    fn pack_url_appends_view_path() {
        let c = client("https://api.packstack.io");
        let url = c.pack_url(&PackId::from("123")).unwrap();
        assert_eq!(url.as_str(), "https://api.packstack.io/api/v1/pack/view/123");
    }

    #[test]
    fn pack_url_keeps_base_path() {
        let c = client("http://127.0.0.1:9000/proxy/");
        let url = c.pack_url(&PackId::from("abc")).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/proxy/api/v1/pack/view/abc");
    }

    #[test]
    fn pack_url_encodes_id_as_single_segment() {
        let c = client("https://api.packstack.io");
        let url = c.pack_url(&PackId::from("a/b")).unwrap();
        assert_eq!(url.as_str(), "https://api.packstack.io/api/v1/pack/view/a%2Fb");
    }

    #[tokio::test]
    async fn blank_id_is_not_found_without_request() {
        // Port 1 is closed; a request would fail rather than return None.
        let c = client("http://127.0.0.1:1");
        assert!(c.fetch_pack(&PackId::from("  ")).await.unwrap().is_none());
    }
}
