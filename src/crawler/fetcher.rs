//! HTTP fetcher implementation
//!
//! This module handles all page requests for the checker, including:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests resolved against the site's base URL
//! - Error classification into timeouts, connection failures and the rest

use crate::checks::FetchedResponse;
use crate::config::FetcherConfig;
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Retrieves one page given its request path
///
/// Implementations must be shareable across worker tasks. A non-2xx status is
/// a normal response; only transport-level failures are errors.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, path: &str) -> FetchResult<FetchedResponse>;
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are not followed so that the status-code check sees them.
///
/// # Example
///
/// ```no_run
/// use sitemap_check::config::FetcherConfig;
/// use sitemap_check::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages from a single site over HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Builds a fetcher and its client from configuration
    pub fn from_config(base_url: &str, config: &FetcherConfig) -> crate::Result<Self> {
        let base_url = Url::parse(base_url)?;
        let client = build_http_client(config)?;
        Ok(Self::new(client, base_url))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> FetchResult<FetchedResponse> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| FetchError::InvalidPath {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(path, e))?;

        let status_code = response.status().as_u16();
        let headers = response.headers().clone();

        let body = response.bytes().await.map_err(|e| FetchError::Body {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        Ok(FetchedResponse {
            path: path.to_string(),
            status_code,
            headers,
            body: body.to_vec(),
        })
    }
}

/// Maps a reqwest error onto the fetch error taxonomy
fn classify_error(path: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            path: path.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            path: path.to_string(),
            message: error.to_string(),
        }
    } else {
        FetchError::Http {
            path: path.to_string(),
            source: error,
        }
    }
}
