//! HTTP transport module
//!
//! Provides the `Transport` seam used by the page fetcher and its reqwest
//! implementation.
//!
//! # Features
//!
//! - **Single-shot requests**: retry policy lives in the fetcher, not here
//! - **Error classification**: HTTP status errors are distinct from network failures
//! - **Throttling**: optional token bucket rate limiter using governor

mod client;
mod rate_limit;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use transport::{RequestConfig, Transport};
