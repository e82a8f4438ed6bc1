//! Transport seam between the fetcher and the network

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: HashMap<String, String>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Performs one HTTP GET and returns the parsed JSON body.
///
/// Implementations report a non-2xx status as `Error::HttpStatus` and
/// failures below HTTP as `Error::Network` or `Error::Timeout`, so callers
/// can tell the two apart. They never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` with the query and timeout from `config`
    async fn get_json(&self, url: &str, config: RequestConfig) -> Result<Value>;
}
