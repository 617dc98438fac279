//! Retry policy for transient transport failures.
//!
//! The policy re-attempts an operation in a bounded loop with an explicit
//! attempt counter. The default schedule matches the PRIDE REST clients:
//! a fixed 10 second wait between attempts, up to 10 retries (11 attempts
//! in total). Exponential backoff and jitter are available but off by
//! default.

use crate::error::{ApiError, ApiResult};
use std::time::Duration;
use tracing::warn;

/// Retry policy configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first try
    pub max_retries: u32,
    /// Wait between attempts
    pub interval: Duration,
    /// Upper bound on the wait when backoff is enabled
    pub max_interval: Duration,
    /// Multiplier applied to the wait on each attempt (1.0 = fixed interval)
    pub multiplier: f64,
    /// Whether to add jitter to the wait
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 10,
            interval: Duration::from_secs(10),
            max_interval: Duration::from_secs(60),
            multiplier: 1.0,
            jitter: false,
        }
    }
}

impl RetryConfig {
    /// Create a new retry config with custom max retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Create a new retry config with a custom wait between attempts.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Create a new retry config with a custom wait upper bound.
    #[must_use]
    pub const fn with_max_interval(mut self, max_interval: Duration) -> Self {
        self.max_interval = max_interval;
        self
    }

    /// Create a new retry config with exponential backoff.
    #[must_use]
    pub const fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Create a new retry config with jitter enabled.
    #[must_use]
    pub const fn with_jitter(mut self) -> Self {
        self.jitter = true;
        self
    }
}

/// Retry policy for executing operations with automatic retries.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Create a new retry policy with the given configuration.
    #[must_use]
    pub const fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Create a retry policy with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(RetryConfig::default())
    }

    /// Calculate the wait before the retry following `attempt`.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_delay =
            self.config.interval.as_millis() as f64 * self.config.multiplier.powi(attempt as i32);

        let delay_ms = base_delay.min(self.config.max_interval.as_millis() as f64);

        let final_delay = if self.config.jitter {
            // Add up to 25% jitter
            let jitter_factor = 1.0 + (rand::random::<f64>() * 0.25);
            delay_ms * jitter_factor
        } else {
            delay_ms
        };

        Duration::from_millis(final_delay as u64)
    }

    /// Check if an error should be retried for the given attempt number.
    #[must_use]
    pub const fn should_retry(&self, error: &ApiError, attempt: u32) -> bool {
        attempt < self.config.max_retries && error.is_retryable()
    }

    /// Execute an async operation with retries.
    ///
    /// Runs a bounded loop: a transient failure waits the configured
    /// interval and re-attempts; a non-retryable failure is returned
    /// immediately. The wait uses [`tokio::time::sleep`], so dropping the
    /// returned future cancels an in-flight attempt or wait.
    ///
    /// # Errors
    ///
    /// Returns the last error once retries are exhausted, or the first
    /// non-retryable error.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> ApiResult<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = ApiResult<T>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    if !self.should_retry(&error, attempt) {
                        return Err(error);
                    }
                    let delay = self.delay_for_attempt(attempt);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Get the maximum number of retries.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.config.max_retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_error() -> ApiError {
        let err = reqwest::Client::new()
            .get("http://")
            .build()
            .expect_err("empty host must not build");
        ApiError::Http(err)
    }

    fn fatal_error() -> ApiError {
        ApiError::unexpected_status("GET", "http://host/project", 500, "")
    }

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(
            RetryConfig::default()
                .with_max_retries(max_retries)
                .with_interval(Duration::from_millis(1)),
        )
    }

    #[test]
    fn test_default_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 10);
        assert_eq!(config.interval, Duration::from_secs(10));
        assert!((config.multiplier - 1.0).abs() < f64::EPSILON);
        assert!(!config.jitter);
    }

    #[test]
    fn test_fixed_interval_schedule() {
        let policy = RetryPolicy::with_defaults();

        for attempt in 0..10 {
            assert_eq!(policy.delay_for_attempt(attempt), Duration::from_secs(10));
        }
    }

    #[test]
    fn test_backoff_and_cap() {
        let config = RetryConfig::default()
            .with_interval(Duration::from_millis(100))
            .with_multiplier(2.0)
            .with_max_interval(Duration::from_millis(300));
        let policy = RetryPolicy::new(config);

        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(300));
        assert_eq!(policy.delay_for_attempt(5), Duration::from_millis(300));
    }

    #[test]
    fn test_should_retry() {
        let policy = RetryPolicy::with_defaults();

        assert!(policy.should_retry(&http_error(), 0));
        assert!(policy.should_retry(&http_error(), 9));

        // Attempt bound reached
        assert!(!policy.should_retry(&http_error(), 10));

        // Fatal errors are never retried
        assert!(!policy.should_retry(&fatal_error(), 0));
    }

    #[tokio::test]
    async fn test_execute_success() {
        let policy = RetryPolicy::with_defaults();
        let result: ApiResult<i32> = policy.execute(|| async { Ok(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_execute_fatal_error_not_retried() {
        let policy = fast_policy(10);
        let mut calls = 0;
        let result: ApiResult<i32> = policy
            .execute(|| {
                calls += 1;
                async { Err(fatal_error()) }
            })
            .await;

        assert!(matches!(result, Err(ApiError::UnexpectedStatus { .. })));
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_execute_succeeds_on_eleventh_attempt() {
        let policy = fast_policy(10);
        let mut calls = 0;
        let result: ApiResult<i32> = policy
            .execute(|| {
                calls += 1;
                let failing = calls <= 10;
                async move {
                    if failing { Err(http_error()) } else { Ok(7) }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls, 11);
    }

    #[tokio::test]
    async fn test_execute_exhausts_retries() {
        let policy = fast_policy(10);
        let mut calls = 0;
        let result: ApiResult<i32> = policy
            .execute(|| {
                calls += 1;
                async { Err(http_error()) }
            })
            .await;

        assert!(matches!(result, Err(ApiError::Http(_))));
        assert_eq!(calls, 11);
    }
}
