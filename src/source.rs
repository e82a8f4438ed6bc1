//! Article source
//!
//! The entry point a pipeline holds on to: a validated config plus the
//! transport and clock the fetcher runs on. Each call to
//! [`ArticleSource::fetch_batch`] starts an independent batch; sources and
//! batches share nothing mutable, so several can run side by side.

use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::fetch::{ArticleBatch, Clock, PageFetcher, PageOutcome, TokioClock};
use crate::http::{HttpClient, Transport};
use crate::schema;
use std::sync::Arc;
use tracing::info;

/// Data source over the keyword article search API
#[derive(Debug)]
pub struct ArticleSource {
    config: SourceConfig,
    fetcher: PageFetcher,
}

impl ArticleSource {
    /// Create a source that talks HTTP with reqwest
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = HttpClient::with_config(config.http_config())?;
        Self::with_transport(config, Arc::new(client), Arc::new(TokioClock))
    }

    /// Create a source over a custom transport and clock
    pub fn with_transport(
        config: SourceConfig,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        let fetcher = PageFetcher::new(
            transport,
            clock,
            config.fetch_policy(),
            config.base_url.clone(),
            config.api_key.clone(),
        );
        Ok(Self { config, fetcher })
    }

    /// The configuration in use
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Field names of the records this source emits
    pub fn get_schema(&self) -> &'static [&'static str] {
        schema::get_schema()
    }

    /// Start a batch of roughly `batch_size` articles matching `query`.
    ///
    /// The batch stops at the first page boundary at or past `batch_size`,
    /// so it may hold up to one page more than asked for.
    pub fn fetch_batch(&self, batch_size: usize, query: impl Into<String>) -> Result<ArticleBatch> {
        if batch_size == 0 {
            return Err(Error::invalid_value("batch_size", "must be greater than 0"));
        }
        let query = query.into();
        info!("Starting batch of {} for query '{}'", batch_size, query);
        Ok(ArticleBatch::new(self.fetcher.clone(), query, batch_size))
    }

    /// Fetch the first page of `query` once to verify key and endpoint
    pub async fn check(&self, query: &str) -> Result<usize> {
        match self.fetcher.fetch_page(query, 0).await {
            PageOutcome::Articles(articles) => Ok(articles.len()),
            PageOutcome::NoData(failure) => Err(Error::Fetch(failure)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchFailure;
    use crate::http::RequestConfig;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::time::Duration;

    struct FixedTransport(Value);

    #[async_trait]
    impl Transport for FixedTransport {
        async fn get_json(&self, _url: &str, _config: RequestConfig) -> Result<Value> {
            Ok(self.0.clone())
        }
    }

    struct Unauthorized;

    #[async_trait]
    impl Transport for Unauthorized {
        async fn get_json(&self, _url: &str, _config: RequestConfig) -> Result<Value> {
            Err(Error::http_status(401, "Invalid ApiKey"))
        }
    }

    struct NoWait;

    #[async_trait]
    impl Clock for NoWait {
        async fn sleep(&self, _duration: Duration) {}
    }

    fn source(transport: impl Transport + 'static) -> ArticleSource {
        ArticleSource::with_transport(
            SourceConfig::new("key"),
            Arc::new(transport),
            Arc::new(NoWait),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = ArticleSource::new(SourceConfig::new("")).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }

    #[test]
    fn test_new_validates_through_with_transport() {
        let mut config = SourceConfig::new("key");
        config.timeout_seconds = 0;

        let err = ArticleSource::new(config).unwrap_err();
        assert!(
            matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "timeout_seconds")
        );
    }

    #[test]
    fn test_new_builds_http_source() {
        let source = ArticleSource::new(SourceConfig::new("key")).unwrap();
        assert_eq!(source.config().page_size, 10);
    }

    #[test]
    fn test_schema_ignores_activity() {
        let source = source(FixedTransport(json!({})));
        let before = source.get_schema().to_vec();
        let _ = source.fetch_batch(10, "anything").unwrap();
        assert_eq!(source.get_schema(), &before[..]);
        assert_eq!(before.len(), 20);
    }

    #[test]
    fn test_fetch_batch_rejects_zero() {
        let err = source(FixedTransport(json!({}))).fetch_batch(0, "q").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "batch_size"));
    }

    #[tokio::test]
    async fn test_fetch_batch_is_lazy_and_independent() {
        let source = source(FixedTransport(json!({
            "response": {"docs": [{"_id": "1", "headline": {"main": "A"}}]}
        })));

        let first = source.fetch_batch(10, "one").unwrap();
        let second = source.fetch_batch(10, "two").unwrap();
        assert_eq!(first.query(), "one");
        assert_eq!(second.query(), "two");

        let (records, _) = first.into_records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["headline.main"], "A");
        assert_eq!(second.state().page, 0);
    }

    #[tokio::test]
    async fn test_check_counts_first_page() {
        let source = source(FixedTransport(json!({"response": {"docs": [{}, {}]}})));
        assert_eq!(source.check("q").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_check_reports_failure() {
        let err = source(Unauthorized).check("q").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Fetch(FetchFailure::Http { status: 401 })
        ));
    }
}
