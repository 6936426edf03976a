use async_trait::async_trait;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};

/// Paces the poller. Returning `false` ends the polling loop.
#[async_trait]
pub trait Ticker: Send {
    async fn wait(&mut self) -> bool;
}

/// Ticks every `period`, starting immediately. Late ticks push the schedule
/// back instead of firing in a burst.
#[derive(Debug)]
pub struct IntervalTicker(Interval);

impl IntervalTicker {
    /// # Panics
    /// Panics if `period` is zero.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self(interval)
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn wait(&mut self) -> bool {
        self.0.tick().await;
        true
    }
}
