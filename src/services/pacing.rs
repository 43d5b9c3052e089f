use std::time::Duration;

/// Where the orchestrator is between two consecutive catalog calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingGap {
    /// Both queries belong to the same batch
    SameBatch,
    /// The next query starts a new batch (next seed artist)
    NextBatch,
}

/// Throttle applied between sequential catalog calls
///
/// Calls are never issued concurrently; the pacer only decides how long to
/// wait before the next one.
#[async_trait::async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, gap: PacingGap);
}

/// Sleeps a fixed interval per gap kind
#[derive(Debug, Clone)]
pub struct FixedIntervalPacer {
    same_batch: Duration,
    next_batch: Duration,
}

impl FixedIntervalPacer {
    pub fn new(same_batch: Duration, next_batch: Duration) -> Self {
        Self {
            same_batch,
            next_batch,
        }
    }

    pub fn delay_for(&self, gap: PacingGap) -> Duration {
        match gap {
            PacingGap::SameBatch => self.same_batch,
            PacingGap::NextBatch => self.next_batch,
        }
    }
}

#[async_trait::async_trait]
impl Pacer for FixedIntervalPacer {
    async fn pause(&self, gap: PacingGap) {
        let delay = self.delay_for(gap);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

#[async_trait::async_trait]
impl Pacer for NoPacing {
    async fn pause(&self, _gap: PacingGap) {}
}
