//! Single-page fetch with rate-limit retry
//!
//! Each page runs a small state machine:
//!
//! ```text
//! Attempting ──2xx──────────────▶ Succeeded
//!     │  ▲
//!   429  └── CooldownWait ◀── (budget left)
//!     │
//!     ├── budget spent ─────────▶ Failed(RetriesExhausted)
//!     └── other status / network / malformed body ▶ Failed
//! ```

use super::clock::Clock;
use super::types::{AttemptState, FetchPolicy, FetchState, PageOutcome};
use crate::error::FetchFailure;
use crate::http::{RequestConfig, Transport};
use crate::types::JsonValue;
use std::sync::Arc;
use tracing::{debug, warn};

/// JSON pointer to the article list in a search response
pub const DOCS_POINTER: &str = "/response/docs";

/// Query parameter names understood by the search API
const QUERY_PARAM: &str = "q";
const API_KEY_PARAM: &str = "api-key";
const PAGE_PARAM: &str = "page";

/// Fetches pages of raw articles for a query
#[derive(Clone)]
pub struct PageFetcher {
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    policy: FetchPolicy,
    endpoint: String,
    api_key: String,
}

impl PageFetcher {
    /// Create a fetcher
    pub fn new(
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
        policy: FetchPolicy,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            clock,
            policy,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// The policy in use
    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// Fetch one page, retrying only while rate limited
    pub async fn fetch_page(&self, query: &str, page: u32) -> PageOutcome {
        let mut state = FetchState::at_page(page);
        self.fetch_current(query, &mut state).await
    }

    /// Fetch `state.page`, counting rate-limited attempts in `state.retries`
    pub(crate) async fn fetch_current(&self, query: &str, state: &mut FetchState) -> PageOutcome {
        let mut step = AttemptState::Attempting;
        loop {
            step = match step {
                AttemptState::Attempting => self.attempt(query, state).await,
                AttemptState::CooldownWait => {
                    self.clock.sleep(self.policy.rate_limit_cooldown).await;
                    AttemptState::Attempting
                }
                AttemptState::Succeeded(articles) => return PageOutcome::Articles(articles),
                AttemptState::Failed(failure) => return PageOutcome::NoData(failure),
            };
        }
    }

    /// Wait the fixed delay that separates consecutive requests
    pub(crate) async fn pace(&self) {
        self.clock.sleep(self.policy.inter_retry_delay).await;
    }

    async fn attempt(&self, query: &str, state: &mut FetchState) -> AttemptState {
        let page = state.page;
        debug!(page, attempt = state.retries + 1, "Fetching page");

        let request = RequestConfig::new()
            .query(QUERY_PARAM, query)
            .query(API_KEY_PARAM, self.api_key.as_str())
            .query(PAGE_PARAM, page.to_string());

        match self.transport.get_json(&self.endpoint, request).await {
            Ok(body) => match extract_docs(body) {
                Ok(articles) => AttemptState::Succeeded(articles),
                Err(failure) => {
                    warn!("Page {} returned a malformed body: {}", page, failure);
                    AttemptState::Failed(failure)
                }
            },
            Err(e) if e.is_rate_limited() => {
                state.retries += 1;
                if state.retries >= self.policy.max_retries {
                    warn!(
                        "Rate limited (429) on page {}, giving up after {} attempts",
                        page, state.retries
                    );
                    AttemptState::Failed(FetchFailure::RetriesExhausted {
                        attempts: state.retries,
                    })
                } else {
                    warn!(
                        "Rate limited (429) on page {}, attempt {}/{}, waiting {:?}",
                        page, state.retries, self.policy.max_retries, self.policy.rate_limit_cooldown
                    );
                    AttemptState::CooldownWait
                }
            }
            Err(e) => {
                warn!("Page {} failed, not retrying: {}", page, e);
                AttemptState::Failed(e.to_fetch_failure())
            }
        }
    }
}

impl std::fmt::Debug for PageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetcher")
            .field("endpoint", &self.endpoint)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Take the article list out of a search response.
///
/// A missing or null list reads as an empty page. Any other shape is an
/// invalid response, so a malformed payload never looks like the end of
/// results.
pub fn extract_docs(mut body: JsonValue) -> Result<Vec<JsonValue>, FetchFailure> {
    match body.get("response") {
        Some(JsonValue::Object(_)) => {}
        Some(JsonValue::Null) | None if body.is_object() => return Ok(Vec::new()),
        Some(_) => return Err(invalid_response("`response` is not an object")),
        None => return Err(invalid_response("body is not an object")),
    }

    match body.pointer_mut(DOCS_POINTER).map(JsonValue::take) {
        Some(JsonValue::Array(docs)) => Ok(docs),
        Some(JsonValue::Null) | None => Ok(Vec::new()),
        Some(_) => Err(invalid_response("`response.docs` is not an array")),
    }
}

fn invalid_response(message: &str) -> FetchFailure {
    FetchFailure::InvalidResponse {
        message: message.to_string(),
    }
}
