//! Delay — injectable sleep seam for the simulated latencies.
//!
//! The image acknowledgement and human handoff both stand in for real latency
//! with fixed timers. Hiding the sleep behind a trait lets unit tests run
//! those transitions synchronously.

use std::time::Duration;

/// Async sleep abstraction.
#[async_trait::async_trait]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real wall-clock delay backed by the tokio timer.
pub struct TokioDelay;

#[async_trait::async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
