//! Fetch policy, per-batch state and outcomes

use crate::error::FetchFailure;
use crate::types::JsonValue;
use std::time::Duration;

/// Retry and pacing policy for page fetches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Attempts per page while the API answers 429
    pub max_retries: u32,
    /// Wait after a 429 before retrying the same page
    pub rate_limit_cooldown: Duration,
    /// Pause before a request that does not follow a cooldown
    pub inter_retry_delay: Duration,
    /// Articles per page
    pub page_size: u32,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            rate_limit_cooldown: Duration::from_secs(60),
            inter_retry_delay: Duration::from_secs(1),
            page_size: 10,
        }
    }
}

/// Progress of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchState {
    /// Next page to request, also the number of pages fetched so far
    pub page: u32,
    /// Rate-limited attempts on the current page
    pub retries: u32,
    /// Records handed to the consumer
    pub emitted: usize,
}

impl FetchState {
    /// Create state positioned at page 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state positioned at an arbitrary page
    pub fn at_page(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Number of pages that returned articles
    pub fn pages_fetched(&self) -> u32 {
        self.page
    }

    /// Move to the next page
    pub fn advance(&mut self) {
        self.page += 1;
        self.retries = 0;
    }
}

/// Step of the per-page retry state machine
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptState {
    /// About to issue the request
    Attempting,
    /// Rate limited, waiting out the cooldown
    CooldownWait,
    /// Got a page of raw articles
    Succeeded(Vec<JsonValue>),
    /// Gave up on the page
    Failed(FetchFailure),
}

/// Result of fetching one page
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// Raw articles, possibly none
    Articles(Vec<JsonValue>),
    /// The page could not be fetched
    NoData(FetchFailure),
}

impl PageOutcome {
    /// Articles on the page, empty when the fetch failed
    pub fn into_articles(self) -> Vec<JsonValue> {
        match self {
            Self::Articles(articles) => articles,
            Self::NoData(_) => Vec::new(),
        }
    }
}

/// How a batch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// A page came back empty
    Exhausted,
    /// Enough pages were fetched to cover the batch size
    Filled,
    /// A page fetch failed; records emitted so far are a partial result
    Failed(FetchFailure),
}

impl BatchOutcome {
    /// True unless the batch was cut short by a failure
    pub fn is_complete(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    /// The failure that ended the batch, if any
    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

impl std::fmt::Display for BatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exhausted => write!(f, "exhausted"),
            Self::Filled => write!(f, "filled"),
            Self::Failed(failure) => write!(f, "failed: {failure}"),
        }
    }
}
