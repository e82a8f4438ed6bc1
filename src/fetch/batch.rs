//! Lazy, page-at-a-time article batches

use super::page::PageFetcher;
use super::types::{BatchOutcome, FetchState, PageOutcome};
use crate::flatten::flatten;
use crate::types::{FlatRecord, JsonValue};
use futures::Stream;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// A single-pass sequence of flattened articles for one query.
///
/// Pages are requested only when the consumer pulls past the records
/// already held, and at most one page is held at a time. Dropping the
/// batch (or the stream made from it) abandons any in-flight request or
/// cooldown.
///
/// Failures never surface as items. Once the sequence ends,
/// [`ArticleBatch::outcome`] tells a cleanly exhausted query apart from
/// one that failed partway.
#[derive(Debug)]
pub struct ArticleBatch {
    fetcher: PageFetcher,
    query: String,
    batch_size: usize,
    state: FetchState,
    current_page: VecDeque<FlatRecord>,
    outcome: Option<BatchOutcome>,
}

impl ArticleBatch {
    /// Create a batch; nothing is fetched until the first pull
    pub fn new(fetcher: PageFetcher, query: impl Into<String>, batch_size: usize) -> Self {
        Self {
            fetcher,
            query: query.into(),
            batch_size,
            state: FetchState::new(),
            current_page: VecDeque::new(),
            outcome: None,
        }
    }

    /// The search query
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Requested approximate size
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Pagination progress so far
    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// How the batch ended, once the last page has been fetched
    pub fn outcome(&self) -> Option<&BatchOutcome> {
        self.outcome.as_ref()
    }

    /// Pull the next record, fetching a page if needed
    pub async fn next(&mut self) -> Option<FlatRecord> {
        loop {
            if let Some(record) = self.current_page.pop_front() {
                self.state.emitted += 1;
                return Some(record);
            }
            if self.outcome.is_some() {
                return None;
            }
            self.load_next_page().await;
        }
    }

    /// Drain the batch, returning every record and the outcome
    pub async fn into_records(mut self) -> (Vec<FlatRecord>, BatchOutcome) {
        let mut records = Vec::new();
        while let Some(record) = self.next().await {
            records.push(record);
        }
        let outcome = self.outcome.take().unwrap_or(BatchOutcome::Exhausted);
        (records, outcome)
    }

    /// Adapt into a `Stream` of records
    pub fn into_stream(self) -> impl Stream<Item = FlatRecord> + Send {
        futures::stream::unfold(self, |mut batch| async move {
            let record = batch.next().await?;
            Some((record, batch))
        })
    }

    async fn load_next_page(&mut self) {
        if self.state.page > 0 {
            self.fetcher.pace().await;
        }

        let page = self.state.page;
        let outcome = self.fetcher.fetch_current(&self.query, &mut self.state).await;
        let articles = match outcome {
            PageOutcome::Articles(articles) if articles.is_empty() => {
                debug!("Page {} is empty", page);
                self.finish(BatchOutcome::Exhausted);
                return;
            }
            PageOutcome::Articles(articles) => articles,
            PageOutcome::NoData(failure) => {
                self.finish(BatchOutcome::Failed(failure));
                return;
            }
        };

        debug!("Page {}: fetched {} articles", page, articles.len());
        self.current_page
            .extend(articles.into_iter().filter_map(to_flat_record));
        self.state.advance();

        let covered =
            u64::from(self.state.pages_fetched()) * u64::from(self.fetcher.policy().page_size);
        if covered >= self.batch_size as u64 {
            self.finish(BatchOutcome::Filled);
        }
    }

    fn finish(&mut self, outcome: BatchOutcome) {
        let queued = self.current_page.len();
        match &outcome {
            BatchOutcome::Failed(_) => warn!(
                "Batch for '{}' ended early after {} pages: {}",
                self.query,
                self.state.pages_fetched(),
                outcome
            ),
            _ => info!(
                "Batch for '{}' {} after {} pages ({} records)",
                self.query,
                outcome,
                self.state.pages_fetched(),
                self.state.emitted + queued
            ),
        }
        self.outcome = Some(outcome);
    }
}

fn to_flat_record(article: JsonValue) -> Option<FlatRecord> {
    match article {
        JsonValue::Object(record) => Some(flatten(record)),
        other => {
            warn!("Skipping non-object article: {}", other);
            None
        }
    }
}
