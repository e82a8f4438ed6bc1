// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # NYT Article Source
//!
//! A data source connector for a keyword article search API. It pages
//! through results for a query, waits out rate limits, and hands back each
//! article as a flat map of dotted keys.
//!
//! ## Features
//!
//! - **Lazy batches**: pages are requested only as records are consumed
//! - **Rate-limit handling**: HTTP 429 triggers a cooldown and a bounded retry
//! - **Flattening**: nested objects become `parent.child` keys, lists stay intact
//! - **Fixed schema**: the 20 top-level article fields the API documents
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nyt_source::{ArticleSource, BatchOutcome, Result, SourceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let source = ArticleSource::new(SourceConfig::new("my-api-key"))?;
//!
//!     let mut batch = source.fetch_batch(25, "Silicon Valley")?;
//!     while let Some(article) = batch.next().await {
//!         println!("{:?}", article.get("headline.main"));
//!     }
//!
//!     if let Some(BatchOutcome::Failed(failure)) = batch.outcome() {
//!         eprintln!("stopped early: {failure}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      ArticleSource                        │
//! │  get_schema()   check(query)   fetch_batch(size, query)   │
//! └──────────────────────────────────────────────────────────┘
//!                             │
//!              ┌──────────────┴──────────────┐
//!              │        ArticleBatch         │
//!              │  next() / into_stream()     │
//!              │  flatten() each article     │
//!              └──────────────┬──────────────┘
//!                             │
//!              ┌──────────────┴──────────────┐
//!              │        PageFetcher          │
//!              │  429 → cooldown → retry     │
//!              └──────┬───────────────┬──────┘
//!                     │               │
//!              ┌──────┴─────┐   ┌─────┴──────┐
//!              │ Transport  │   │   Clock    │
//!              │ HttpClient │   │ TokioClock │
//!              └────────────┘   └────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod flatten;
pub mod http;
pub mod schema;
pub mod source;
pub mod types;

pub use config::SourceConfig;
pub use error::{Error, FetchFailure, Result};
pub use fetch::{ArticleBatch, BatchOutcome};
pub use flatten::flatten;
pub use schema::get_schema;
pub use source::ArticleSource;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
