//! Solr API client configuration.

use pride_common::{ApiError, ApiResult, HttpConfig, RetryConfig};
use secrecy::SecretString;
use std::time::Duration;

/// Environment variable holding the API base URL.
pub const ENV_BASE_URL: &str = "PRIDE_SOLR_API_BASE_URL";
/// Environment variable holding the API key header name.
pub const ENV_API_KEY_NAME: &str = "PRIDE_SOLR_API_KEY_NAME";
/// Environment variable holding the API key value.
pub const ENV_API_KEY_VALUE: &str = "PRIDE_SOLR_API_KEY_VALUE";
/// Environment variable holding the calling application name.
pub const ENV_APP_NAME: &str = "PRIDE_SOLR_API_APP_NAME";

/// Solr API client configuration.
///
/// The four identity parameters (base URL, API key header name, API key
/// value, application name) have no defaults and must be supplied by the
/// caller. Timeouts and the retry schedule default to the historical
/// values of the PRIDE clients and can be overridden.
#[derive(Debug, Clone)]
pub struct SolrApiConfig {
    /// Base URL of the Solr REST API
    pub base_url: String,
    /// Name of the API key header
    pub api_key_name: String,
    /// Value of the API key header
    pub api_key_value: SecretString,
    /// Name of the application calling the API, sent in the `app` header
    pub app_name: String,
    /// HTTP transport settings
    pub http: HttpConfig,
    /// Retry schedule for transient failures
    pub retry: RetryConfig,
}

impl SolrApiConfig {
    /// Create a new configuration.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        api_key_name: impl Into<String>,
        api_key_value: impl Into<String>,
        app_name: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key_name: api_key_name.into(),
            api_key_value: SecretString::from(api_key_value.into()),
            app_name: app_name.into(),
            http: HttpConfig::default(),
            retry: RetryConfig::default(),
        }
    }

    /// Load the configuration from `PRIDE_SOLR_API_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidConfig`] naming the first missing variable.
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ApiResult<Self> {
        let require = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| {
                    ApiError::invalid_config(format!("environment variable {name} is not set"))
                })
        };

        Ok(Self::new(
            require(ENV_BASE_URL)?,
            require(ENV_API_KEY_NAME)?,
            require(ENV_API_KEY_VALUE)?,
            require(ENV_APP_NAME)?,
        ))
    }

    /// Set the HTTP transport settings.
    #[must_use]
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Set the retry schedule.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http.timeout = timeout;
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.http.connect_timeout = timeout;
        self
    }
}
