//! HTTP client for the BCS API
//!
//! Every request carries the API key in the `x-api-key` header and every
//! non-2xx response is turned into a [`StatusError`]. Requests that produce
//! parsed results go through the client's [`RateLimiter`]; raw downloads do
//! not.

use futures::TryStreamExt;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::io::StreamReader;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::bulk::{scan_bulk, BulkResults, ScanOptions};
use crate::endpoints;
use crate::error::{BcsError, Result, StatusError};
use crate::rate_limit::{
    RateLimitConfig, RateLimiter, DEFAULT_RATE_LIMIT_BURST, DEFAULT_RATE_LIMIT_PER_SECOND,
};

// ============================================================================
// Client Constants
// ============================================================================

/// Default API root; the vendor's demo environment.
pub const DEFAULT_BASE_URL: &str = "https://demo.api.csco-bcs.com/v2";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Client configuration
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub rate_per_second: u32,
    pub burst: u32,
    /// Options used when scanning live bulk bodies
    pub scan_options: ScanOptions,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            rate_per_second: DEFAULT_RATE_LIMIT_PER_SECOND,
            burst: DEFAULT_RATE_LIMIT_BURST,
            scan_options: ScanOptions::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_rate_limit(mut self, per_second: u32, burst: u32) -> Self {
        self.rate_per_second = per_second;
        self.burst = burst;
        self
    }

    pub fn with_scan_options(mut self, scan_options: ScanOptions) -> Self {
        self.scan_options = scan_options;
        self
    }

    /// Build configuration from `BCS_*` environment variables.
    ///
    /// An unset `BCS_API_KEY` yields an empty key, which [`Client::new`]
    /// rejects with [`BcsError::MissingApiKey`].
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new(std::env::var("BCS_API_KEY").unwrap_or_default());

        if let Ok(base_url) = std::env::var("BCS_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(secs) = env_number::<u64>("BCS_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(per_second) = env_number::<u32>("BCS_RATE_LIMIT_PER_SECOND")? {
            config.rate_per_second = per_second;
        }
        if let Some(burst) = env_number::<u32>("BCS_RATE_LIMIT_BURST")? {
            config.burst = burst;
        }

        Ok(config)
    }

    pub fn rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig {
            per_second: self.rate_per_second,
            burst: self.burst,
        }
    }
}

fn env_number<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| BcsError::invalid_config(format!("{name} must be a number, got {value:?}"))),
        Err(_) => Ok(None),
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("rate_per_second", &self.rate_per_second)
            .field("burst", &self.burst)
            .field("scan_options", &self.scan_options)
            .finish()
    }
}

/// BCS API client
///
/// Cheap to share behind an `Arc`; all methods take `&self` and the rate
/// limiter is safe for concurrent use.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
    limiter: RateLimiter,
}

impl Client {
    /// Create a client with its own HTTP connection pool.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Self::with_http_client(config, http)
    }

    /// Create a client on top of a caller-supplied [`reqwest::Client`].
    ///
    /// The caller's client keeps its own timeout settings; `config.timeout`
    /// is not applied.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(BcsError::MissingApiKey);
        }
        let limiter = RateLimiter::new(config.rate_limit())?;

        Ok(Self {
            http,
            config,
            limiter,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Bulk endpoint operations
    pub fn bulk(&self) -> BulkService<'_> {
        BulkService { client: self }
    }

    /// Rate-limited GET decoding the body as JSON.
    ///
    /// A `201 Created` response has no body of interest and yields `None`.
    /// Cancelling `cancel` aborts the rate limiter wait and the request.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<T>> {
        self.limiter.acquire(cancel).await?;

        let request = async {
            let response = self.send(url).await?;
            if response.status() == reqwest::StatusCode::CREATED {
                return Ok(None);
            }

            let body = response.bytes().await?;
            Ok(Some(serde_json::from_slice(&body)?))
        };

        until_cancelled(cancel, request).await
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response> {
        debug!(url = %url, "Sending request");

        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await?;

        let status = response.status();
        if let Some(err) = StatusError::from_status(status) {
            debug!(url = %url, status = status.as_u16(), "Request rejected");
            return Err(err.into());
        }

        Ok(response)
    }
}

/// Run `operation` unless `cancel` fires first.
async fn until_cancelled<T>(
    cancel: &CancellationToken,
    operation: impl std::future::Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(BcsError::Cancelled),
        result = operation => result,
    }
}

/// Operations on the customer bulk alerts endpoint
#[derive(Debug, Clone, Copy)]
pub struct BulkService<'a> {
    client: &'a Client,
}

impl BulkService<'_> {
    /// Fetch the bulk stream for `customer_id` and scan it as it arrives.
    ///
    /// The body is never buffered whole. Cancelling `cancel` aborts the rate
    /// limiter wait, the request and the scan.
    pub async fn retrieve(
        &self,
        customer_id: &str,
        cancel: &CancellationToken,
    ) -> Result<BulkResults> {
        self.client.limiter.acquire(cancel).await?;

        let url = endpoints::bulk_alerts_url(self.client.base_url(), customer_id);
        let fetch = async {
            let response = self.client.send(&url).await?;

            let body = response.bytes_stream().map_err(std::io::Error::other);
            let reader = StreamReader::new(Box::pin(body));
            scan_bulk(reader, self.client.config.scan_options).await
        };

        until_cancelled(cancel, fetch).await
    }

    /// Copy the raw bulk stream for `customer_id` into `writer`.
    ///
    /// Not rate limited and not parsed. Returns the number of bytes written.
    pub async fn download<W>(&self, customer_id: &str, writer: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let url = endpoints::bulk_alerts_url(self.client.base_url(), customer_id);
        let response = self.client.send(&url).await?;

        let body = response.bytes_stream().map_err(std::io::Error::other);
        let mut reader = StreamReader::new(Box::pin(body));

        let written = tokio::io::copy(&mut reader, writer).await?;
        writer.flush().await?;

        debug!(customer_id = %customer_id, bytes = written, "Bulk download complete");

        Ok(written)
    }
}
