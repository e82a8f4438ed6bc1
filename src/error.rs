//! Error types for the article source
//!
//! This module defines the error hierarchy for the crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Page-level failures never escape a batch; they are classified into a
//! [`FetchFailure`] and recorded as the batch outcome instead.

use thiserror::Error;

/// The main error type for the article source
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Fetch Errors
    // ============================================================================
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchFailure),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Check if this error is an HTTP 429
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::HttpStatus { status: 429, .. })
    }

    /// Check if this error happened below the HTTP layer
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Network { .. } | Error::Timeout { .. }
        )
    }

    /// Classify a transport error that ends a page fetch without retry.
    ///
    /// Rate limiting is retried by the caller and only becomes a failure
    /// once the budget is spent, see [`FetchFailure::RetriesExhausted`].
    pub fn to_fetch_failure(&self) -> FetchFailure {
        match self {
            Error::HttpStatus { status, .. } => FetchFailure::Http { status: *status },
            e if e.is_network() => FetchFailure::Network {
                message: e.to_string(),
            },
            e => FetchFailure::InvalidResponse {
                message: e.to_string(),
            },
        }
    }
}

/// Why a page fetch produced no data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// Still rate limited after every attempt
    #[error("rate limited on all {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    /// Non-429 HTTP error status
    #[error("HTTP {status}")]
    Http { status: u16 },

    /// Connection, DNS or timeout failure
    #[error("network failure: {message}")]
    Network { message: String },

    /// 2xx response whose body was not JSON or not a search result
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },
}

/// Result type alias for the article source
pub type Result<T> = std::result::Result<T, Error>;
