//! Paginated fetch module
//!
//! Walks the search API page by page for one query.
//!
//! # Overview
//!
//! - `PageFetcher` - one page per call, retrying only on HTTP 429
//! - `ArticleBatch` - pull-based sequence of flattened articles, capped
//!   at the first page boundary that covers the batch size
//! - `Clock` - sleep seam so cooldowns can be observed in tests

mod batch;
mod clock;
mod page;
mod types;

pub use batch::ArticleBatch;
pub use clock::{Clock, TokioClock};
pub use page::{extract_docs, PageFetcher, DOCS_POINTER};
pub use types::{AttemptState, BatchOutcome, FetchPolicy, FetchState, PageOutcome};
