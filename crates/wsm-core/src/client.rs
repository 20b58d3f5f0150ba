//! HTTP client with rate limiting for WatchSoMuch
//!
//! This module provides the HTML fetcher used by the provider: a
//! rate-limited HTTP client with retry and exponential backoff for
//! transient errors.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};

use crate::error::{Result, WsmError};

/// Default User-Agent mimicking a modern browser
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default Accept-Language header
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Maximum number of retry attempts for transient errors
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_RETRY_DELAY_MS: u64 = 1000;

/// Rate limiter to control request frequency
///
/// Ensures that requests are spaced at least `min_interval` apart.
pub struct RateLimiter {
    /// Minimum interval between requests
    min_interval: Duration,
    /// Timestamp of the last request
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// # Example
    /// ```
    /// use wsm_core::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(2.0); // 2 requests per second
    /// ```
    ///
    /// A rate that is zero, negative or not finite disables the limit.
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = if requests_per_second.is_finite() && requests_per_second > 0.0 {
            Duration::try_from_secs_f64(1.0 / requests_per_second).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };
        let last = Instant::now()
            .checked_sub(min_interval)
            .unwrap_or_else(Instant::now);
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(last)),
        }
    }

    /// Wait until the next request may be sent
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last = Instant::now();
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 2.0,
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP client with rate limiting and retry logic
///
/// This client automatically:
/// - Limits request rate to avoid server overload
/// - Retries on transient errors (429, 5xx) with exponential backoff
pub struct WsmClient {
    client: reqwest::Client,
    rate_limiter: RateLimiter,
}

impl WsmClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE));

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.requests_per_second),
        })
    }

    /// Fetch the HTML of an absolute URL
    ///
    /// This method handles rate limiting and retries automatically.
    ///
    /// # Errors
    /// - `WsmError::HttpError` - Network or HTTP error after all retries
    /// - `WsmError::RateLimited` - Server returned 429 after all retries
    /// - `WsmError::NotFound` - Server returned 404
    pub async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!("Fetching {}", url);
        self.fetch_with_retry(url, 0).await
    }

    fn fetch_with_retry<'a>(
        &'a self,
        url: &'a str,
        attempt: u32,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            self.rate_limiter.acquire().await;

            let response = self.client.get(url).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response.text().await?);
            }

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(WsmError::NotFound(url.to_string()));
            }

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                if attempt < MAX_RETRIES {
                    let delay = self.calculate_backoff_delay(attempt);
                    tracing::debug!(
                        "{} returned {}, retrying in {:?} (attempt {})",
                        url,
                        status,
                        delay,
                        attempt + 1
                    );
                    sleep(delay).await;
                    return self.fetch_with_retry(url, attempt + 1).await;
                }
                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    return Err(WsmError::RateLimited);
                }
            }

            match response.error_for_status() {
                Err(e) => Err(WsmError::HttpError(e)),
                // Redirects and other non-error statuses land here
                Ok(response) => Ok(response.text().await?),
            }
        })
    }

    /// Calculate exponential backoff delay for retry
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        // 1s, 2s, 4s, ...
        Duration::from_millis(BASE_RETRY_DELAY_MS * 2u64.pow(attempt))
    }
}
