//! Sleep seam for cooldowns and pacing

use async_trait::async_trait;
use std::time::Duration;

/// Source of delays. Tests swap in a clock that records instead of waiting.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Wait for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Clock backed by the tokio timer; sleeping yields to other tasks
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
