//! Client configuration
//!
//! A YAML document describing the request to page through, how to reach the
//! server and which query parameters carry continuation tokens. Every field
//! except the URL has a default, and the URL may also come from the command
//! line.
//!
//! ```yaml
//! url: https://api.twitter.com/2/tweets/search/recent
//! query:
//!   query: from:rustlang
//!   expansions: author_id,attachments.media_keys
//! bearer_token_env: TWITTER_BEARER_TOKEN
//! http:
//!   timeout_secs: 10
//!   max_retries: 2
//!   backoff:
//!     type: linear
//!     initial_ms: 250
//! pagination:
//!   next_param: next_token
//!   previous_param: previous
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpFetcher, HttpFetcherConfig};
use crate::pagination::{Fetcher, PaginationConfig, RequestContext};
use crate::types::{BackoffType, LogLevel, OptionStringExt, StringMap};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Complete client configuration loaded from YAML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Endpoint of the first page
    #[serde(default)]
    pub url: Option<String>,

    /// Query parameters of the first request, repeated on every page
    #[serde(default)]
    pub query: StringMap,

    /// Bearer token sent as `Authorization`
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Environment variable to read the bearer token from
    #[serde(default)]
    pub bearer_token_env: Option<String>,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Token parameter names
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Log level used by the command-line driver
    #[serde(default)]
    pub log_level: LogLevel,
}

impl ClientConfig {
    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        debug!(path = %path.display(), "Loaded client config");
        Self::from_yaml_str(&content)
    }

    /// Parse a config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the URL (when present) and the pagination parameter names
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.url {
            url::Url::parse(url)?;
        }
        if self.pagination.next_param.is_empty() || self.pagination.previous_param.is_empty() {
            return Err(Error::config("Pagination parameter names cannot be empty"));
        }
        Ok(())
    }

    /// The configured URL, or a config error when there is none
    pub fn require_url(&self) -> Result<&str> {
        self.url
            .as_deref()
            .ok_or_else(|| Error::config("No request URL configured"))
    }

    /// Bearer token, preferring the literal value over the environment
    pub fn resolve_bearer_token(&self) -> Option<String> {
        self.bearer_token.clone().none_if_empty().or_else(|| {
            self.bearer_token_env
                .as_deref()
                .and_then(|name| std::env::var(name).ok())
                .none_if_empty()
        })
    }

    /// Settings for the HTTP fetcher
    pub fn fetcher_config(&self) -> HttpFetcherConfig {
        let mut config = self.http.to_fetcher_config();
        if let Some(token) = self.resolve_bearer_token() {
            config
                .default_headers
                .insert("Authorization".to_string(), format!("Bearer {token}"));
        }
        config
    }

    /// Build the HTTP fetcher
    pub fn build_fetcher(&self) -> Result<HttpFetcher> {
        HttpFetcher::with_config(self.fetcher_config())
    }

    /// Request context for the configured URL and query
    pub fn request_context(&self, fetcher: Arc<dyn Fetcher>) -> Result<RequestContext> {
        let url = self.require_url()?;
        Ok(RequestContext::new(fetcher, url)
            .with_query(self.query.clone())
            .with_pagination(self.pagination.clone()))
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub backoff: BackoffConfig,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: StringMap,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            backoff: BackoffConfig::default(),
            user_agent: None,
            headers: StringMap::new(),
        }
    }
}

impl HttpConfig {
    /// Convert into fetcher settings
    pub fn to_fetcher_config(&self) -> HttpFetcherConfig {
        let mut builder = HttpFetcherConfig::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff.backoff_type,
                Duration::from_millis(self.backoff.initial_ms),
                Duration::from_millis(self.backoff.max_ms),
            );
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        builder.build()
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60000
}
