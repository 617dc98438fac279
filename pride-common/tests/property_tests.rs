//! Property-based tests for the retry policy.
//!
//! Tests validate:
//! - The fixed-interval schedule used by the Solr client
//! - The backoff cap when a multiplier is configured
//! - The attempt bound of the retry decision

use pride_common::{ApiError, RetryConfig, RetryPolicy};
use proptest::prelude::*;
use std::time::Duration;

fn transient_error() -> ApiError {
    let err = reqwest::Client::new()
        .get("http://")
        .build()
        .expect_err("empty host must not build");
    ApiError::Http(err)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// With multiplier 1.0 and no jitter, every attempt waits exactly
    /// the configured interval.
    #[test]
    fn prop_fixed_interval_schedule(
        interval_ms in 1u64..60_000,
        attempt in 0u32..20,
    ) {
        let policy = RetryPolicy::new(
            RetryConfig::default()
                .with_interval(Duration::from_millis(interval_ms))
                .with_max_interval(Duration::from_millis(interval_ms)),
        );

        prop_assert_eq!(
            policy.delay_for_attempt(attempt),
            Duration::from_millis(interval_ms)
        );
    }

    /// With backoff enabled the wait never exceeds the configured cap.
    #[test]
    fn prop_backoff_respects_cap(
        interval_ms in 1u64..1_000,
        max_ms in 1_000u64..120_000,
        multiplier in 1.0f64..4.0,
        attempt in 0u32..30,
    ) {
        let policy = RetryPolicy::new(
            RetryConfig::default()
                .with_interval(Duration::from_millis(interval_ms))
                .with_max_interval(Duration::from_millis(max_ms))
                .with_multiplier(multiplier),
        );

        prop_assert!(policy.delay_for_attempt(attempt) <= Duration::from_millis(max_ms));
    }

    /// A transient error is retried strictly below the attempt bound and
    /// never at or past it.
    #[test]
    fn prop_attempt_bound(
        max_retries in 0u32..20,
        attempt in 0u32..40,
    ) {
        let policy = RetryPolicy::new(RetryConfig::default().with_max_retries(max_retries));
        let error = transient_error();

        prop_assert_eq!(
            policy.should_retry(&error, attempt),
            attempt < max_retries
        );
    }

    /// Fatal errors are never retried, whatever the attempt number.
    #[test]
    fn prop_fatal_never_retried(
        attempt in 0u32..40,
        status in 100u16..600,
    ) {
        let policy = RetryPolicy::with_defaults();
        let error = ApiError::unexpected_status("GET", "http://host/project", status, "");

        prop_assert!(!policy.should_retry(&error, attempt));
    }
}
