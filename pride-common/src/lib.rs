//! Shared library for cross-cutting concerns in PRIDE Archive API clients.
//!
//! This crate provides centralized implementations for:
//! - Error types with retryability classification
//! - HTTP client configuration and building
//! - Retry policies with a bounded attempt loop

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod retry;

pub use error::{ApiError, ApiResult};
pub use http::{HttpConfig, build_http_client};
pub use retry::{RetryConfig, RetryPolicy};
