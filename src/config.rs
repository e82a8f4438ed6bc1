//! Source configuration
//!
//! Loaded from YAML (or JSON, which YAML accepts) with every field except
//! the API key defaulted:
//!
//! ```yaml
//! api_key: "..."
//! max_retries: 5
//! rate_limit_cooldown_seconds: 60
//! inter_retry_delay_seconds: 1
//! page_size: 10
//! ```

use crate::error::{Error, Result};
use crate::fetch::FetchPolicy;
use crate::http::{HttpClientConfig, RateLimiterConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Article Search endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.nytimes.com/svc/search/v2/articlesearch.json";

// ============================================================================
// Source Config
// ============================================================================

/// Configuration for an article source
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// API key sent with every request
    #[serde(default)]
    pub api_key: String,

    /// Search endpoint URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Attempts per page while rate limited
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Wait after a 429 before retrying the same page
    #[serde(default = "default_cooldown")]
    pub rate_limit_cooldown_seconds: u64,

    /// Pause between requests that are not preceded by a cooldown
    #[serde(default = "default_inter_retry_delay")]
    pub inter_retry_delay_seconds: u64,

    /// Articles per page reported by the API
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Optional client-side throttle
    #[serde(default)]
    pub requests_per_second: Option<u32>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_retries() -> u32 {
    5
}

fn default_cooldown() -> u64 {
    60
}

fn default_inter_retry_delay() -> u64 {
    1
}

fn default_page_size() -> u32 {
    10
}

fn default_timeout() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            max_retries: default_max_retries(),
            rate_limit_cooldown_seconds: default_cooldown(),
            inter_retry_delay_seconds: default_inter_retry_delay(),
            page_size: default_page_size(),
            timeout_seconds: default_timeout(),
            requests_per_second: None,
        }
    }
}

impl SourceConfig {
    /// Create a config with defaults and the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Parse a YAML (or JSON) document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from a YAML (or JSON) file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_yaml_str(&content)
    }

    /// Set the endpoint URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the attempt budget for rate-limited pages
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the rate-limit cooldown and inter-request delay, in seconds
    #[must_use]
    pub fn with_delays(mut self, cooldown_seconds: u64, inter_retry_seconds: u64) -> Self {
        self.rate_limit_cooldown_seconds = cooldown_seconds;
        self.inter_retry_delay_seconds = inter_retry_seconds;
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Enable client-side throttling
    #[must_use]
    pub fn with_requests_per_second(mut self, rps: u32) -> Self {
        self.requests_per_second = Some(rps);
        self
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field("api_key"));
        }
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than 0"));
        }
        if self.max_retries == 0 {
            return Err(Error::invalid_value(
                "max_retries",
                "must allow at least one attempt",
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::invalid_value("timeout_seconds", "must be greater than 0"));
        }
        url::Url::parse(&self.base_url)?;
        Ok(())
    }

    /// Retry and pacing policy for the page fetcher
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy {
            max_retries: self.max_retries,
            rate_limit_cooldown: Duration::from_secs(self.rate_limit_cooldown_seconds),
            inter_retry_delay: Duration::from_secs(self.inter_retry_delay_seconds),
            page_size: self.page_size,
        }
    }

    /// Settings for the reqwest transport
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder =
            HttpClientConfig::builder().timeout(Duration::from_secs(self.timeout_seconds));
        if let Some(rps) = self.requests_per_second {
            builder = builder.rate_limit(RateLimiterConfig::per_second(rps));
        }
        builder.build()
    }
}

impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("max_retries", &self.max_retries)
            .field(
                "rate_limit_cooldown_seconds",
                &self.rate_limit_cooldown_seconds,
            )
            .field("inter_retry_delay_seconds", &self.inter_retry_delay_seconds)
            .field("page_size", &self.page_size)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("requests_per_second", &self.requests_per_second)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SourceConfig::new("key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.rate_limit_cooldown_seconds, 60);
        assert_eq!(config.inter_retry_delay_seconds, 1);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.requests_per_second.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_from_yaml_fills_defaults() {
        let yaml = r#"
api_key: "abc"
max_retries: 2
rate_limit_cooldown_seconds: 5
"#;

        let config = SourceConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.api_key, "abc");
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.rate_limit_cooldown_seconds, 5);
        assert_eq!(config.inter_retry_delay_seconds, 1);
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_from_json_document() {
        let config =
            SourceConfig::from_yaml_str(r#"{"api_key": "abc", "page_size": 20}"#).unwrap();

        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key: from-file\nrequests_per_second: 5").unwrap();

        let config = SourceConfig::from_file(file.path()).unwrap();

        assert_eq!(config.api_key, "from-file");
        assert_eq!(config.requests_per_second, Some(5));
    }

    #[test]
    fn test_from_missing_file() {
        let err = SourceConfig::from_file("/nonexistent/source.yaml").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_validate_requires_api_key() {
        let err = SourceConfig::new("  ").validate().unwrap_err();
        assert_eq!(err.to_string(), "Missing required config field: api_key");
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let err = SourceConfig::new("k").with_page_size(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "page_size"));

        let err = SourceConfig::new("k").with_max_retries(0).validate().unwrap_err();
        assert!(
            matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "max_retries")
        );
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let err = SourceConfig::new("k")
            .with_base_url("not a url")
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_fetch_policy() {
        let policy = SourceConfig::new("k").with_delays(3, 0).fetch_policy();

        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.rate_limit_cooldown, Duration::from_secs(3));
        assert_eq!(policy.inter_retry_delay, Duration::ZERO);
        assert_eq!(policy.page_size, 10);
    }

    #[test]
    fn test_http_config() {
        let http = SourceConfig::new("k").http_config();
        assert_eq!(http.timeout, Duration::from_secs(30));
        assert!(http.rate_limit.is_none());

        let http = SourceConfig::new("k").with_requests_per_second(4).http_config();
        assert_eq!(http.rate_limit, Some(RateLimiterConfig::per_second(4)));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let debug_str = format!("{:?}", SourceConfig::new("super-secret"));
        assert!(!debug_str.contains("super-secret"));
        assert!(debug_str.contains("<redacted>"));
    }
}
