//! Blocking HTTP fetcher with retry and backoff
//!
//! Handles:
//! - Automatic retries on throttling, gateway errors and timeouts
//! - Constant, linear or exponential backoff between attempts
//! - Default headers (bearer tokens and the like) on every request

use crate::error::{is_retryable_status, Error, Result};
use crate::pagination::{Fetcher, RawResponse};
use crate::types::{BackoffType, StringMap};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the HTTP fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcherConfig {
    /// Base URL that relative request paths are joined to
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Headers sent with every request
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            backoff_type: BackoffType::Exponential,
            default_headers: StringMap::new(),
            user_agent: format!("tweetpage/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpFetcherConfig {
    pub fn builder() -> HttpFetcherConfigBuilder {
        HttpFetcherConfigBuilder::default()
    }
}

/// Builder for [`HttpFetcherConfig`]
#[derive(Debug, Default)]
pub struct HttpFetcherConfigBuilder {
    config: HttpFetcherConfig,
}

impl HttpFetcherConfigBuilder {
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff strategy and bounds
    #[must_use]
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Add a default header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Add an `Authorization: Bearer` header
    #[must_use]
    pub fn bearer_token(self, token: impl AsRef<str>) -> Self {
        let value = format!("Bearer {}", token.as_ref());
        self.header("Authorization", value)
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    pub fn build(self) -> HttpFetcherConfig {
        self.config
    }
}

/// [`Fetcher`] backed by a blocking reqwest client
///
/// Non-retryable statuses come back as a [`RawResponse`] so the caller decides
/// what a 4xx means. Throttling that outlasts the retry budget surfaces as
/// [`Error::RateLimited`].
pub struct HttpFetcher {
    client: Client,
    config: HttpFetcherConfig,
}

impl HttpFetcher {
    /// Create a fetcher with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpFetcherConfig::default())
    }

    /// Create a fetcher with custom configuration
    pub fn with_config(config: HttpFetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpFetcherConfig {
        &self.config
    }

    /// GET `url` with `params`, retrying transient failures
    pub fn send(&self, url: &str, params: &StringMap) -> Result<RawResponse> {
        let full_url = self.build_url(url);
        let max_retries = self.config.max_retries;

        let mut attempt = 0;

        loop {
            let mut req = self.client.get(&full_url);

            for (key, value) in &self.config.default_headers {
                req = req.header(key.as_str(), value.as_str());
            }

            if !params.is_empty() {
                req = req.query(params);
            }

            match req.send() {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = extract_retry_after(&response);
                        if attempt < max_retries {
                            warn!(
                                "Rate limited (429), attempt {}/{}, waiting {}s",
                                attempt + 1,
                                max_retries + 1,
                                retry_after
                            );
                            std::thread::sleep(Duration::from_secs(retry_after));
                            attempt += 1;
                            continue;
                        }
                        return Err(Error::RateLimited {
                            retry_after_seconds: retry_after,
                        });
                    }

                    if is_retryable_status(status.as_u16()) && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            "Request failed with {}, attempt {}/{}, retrying in {:?}",
                            status.as_u16(),
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        std::thread::sleep(delay);
                        attempt += 1;
                        continue;
                    }

                    debug!(status = status.as_u16(), url = %full_url, "Request completed");
                    return read_response(response);
                }
                Err(e) => {
                    if e.is_timeout() {
                        let timeout_ms = self.config.timeout.as_millis() as u64;
                        if attempt < max_retries {
                            let delay = self.calculate_backoff(attempt);
                            warn!(
                                "Request timeout, attempt {}/{}, retrying in {:?}",
                                attempt + 1,
                                max_retries + 1,
                                delay
                            );
                            std::thread::sleep(delay);
                            attempt += 1;
                            continue;
                        }
                        return Err(Error::Timeout { timeout_ms });
                    }

                    if e.is_connect() && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            "Connection error, attempt {}/{}, retrying in {:?}",
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        std::thread::sleep(delay);
                        attempt += 1;
                        continue;
                    }

                    return Err(Error::Http(e));
                }
            }
        }
    }

    /// Build full URL from a path or absolute URL
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.config.backoff_type {
            BackoffType::Constant => self.config.initial_backoff,
            BackoffType::Linear => self.config.initial_backoff.saturating_mul(attempt + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.config.initial_backoff.saturating_mul(factor)
            }
        };

        std::cmp::min(delay, self.config.max_backoff)
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &str, params: &StringMap) -> Result<RawResponse> {
        self.send(url, params)
    }
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn read_response(response: Response) -> Result<RawResponse> {
    let status = response.status().as_u16();
    let body = response.bytes()?;
    Ok(RawResponse::new(status, body.to_vec()))
}

/// Extract retry-after header value in seconds
fn extract_retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .unwrap_or(60)
}
