//! Client configuration for the NCBI E-utilities API

use std::time::Duration;

use crate::rate_limit::RateLimiter;
use crate::retry::RetryConfig;

const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
const DEFAULT_TOOL: &str = "pubmed-matcher";

/// Configuration for [`PubMedClient`](crate::PubMedClient)
///
/// NCBI asks API consumers to identify themselves via the `tool` and `email`
/// parameters and offers a higher rate limit (10 requests/second instead of 3)
/// to requests carrying an `api_key`.
///
/// # Example
///
/// ```
/// use pubmed_matcher::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_api_key("your_api_key")
///     .with_email("researcher@university.edu");
/// assert_eq!(config.effective_rate_limit(), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Option<String>,
    api_key: Option<String>,
    email: Option<String>,
    tool: Option<String>,
    rate_limit: Option<f64>,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Retry policy for transient API failures
    pub retry_config: RetryConfig,
}

impl ClientConfig {
    /// Create a configuration with NCBI defaults (3 requests/second, no API key)
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            email: None,
            tool: None,
            rate_limit: None,
            timeout: Duration::from_secs(30),
            retry_config: RetryConfig::default(),
        }
    }

    /// Override the E-utilities base URL (primarily for tests against a mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the NCBI API key, raising the default rate limit to 10 requests/second
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the contact email sent with every request
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the tool name sent with every request
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Override the rate limit in requests per second
    pub fn with_rate_limit(mut self, requests_per_second: f64) -> Self {
        self.rate_limit = Some(requests_per_second);
        self
    }

    /// Set the HTTP request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    /// Effective base URL (configured override or the NCBI endpoint)
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Effective tool name
    pub fn effective_tool(&self) -> &str {
        self.tool.as_deref().unwrap_or(DEFAULT_TOOL)
    }

    /// Effective user agent string
    pub fn effective_user_agent(&self) -> String {
        format!(
            "{}/{} (+https://www.ncbi.nlm.nih.gov/books/NBK25497/)",
            DEFAULT_TOOL,
            env!("CARGO_PKG_VERSION")
        )
    }

    /// Effective rate limit: explicit override, else 10/s with an API key, else 3/s
    pub fn effective_rate_limit(&self) -> f64 {
        if let Some(rate) = self.rate_limit {
            rate
        } else if self.api_key.is_some() {
            10.0
        } else {
            3.0
        }
    }

    /// Create a rate limiter matching [`effective_rate_limit`](Self::effective_rate_limit)
    pub fn create_rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(self.effective_rate_limit())
    }

    /// Query parameters appended to every API request (api_key, email, tool)
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(api_key) = &self.api_key {
            params.push(("api_key".to_string(), api_key.clone()));
        }
        if let Some(email) = &self.email {
            params.push(("email".to_string(), email.clone()));
        }
        if let Some(tool) = &self.tool {
            params.push(("tool".to_string(), tool.clone()));
        }
        params
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
