//! Fixed-interval collection loop.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use super::RewardsService;

/// Runs [`RewardsService::collect`] immediately and then every `interval`.
#[derive(Debug, Clone)]
pub struct Scheduler {
    service: Arc<RewardsService>,
    interval: Duration,
}

impl Scheduler {
    /// Creates a scheduler. A zero interval is raised to one second.
    #[must_use]
    pub fn new(service: Arc<RewardsService>, interval: Duration) -> Self {
        Self {
            service,
            interval: interval.max(Duration::from_secs(1)),
        }
    }

    /// Loops until `shutdown` resolves. Failed runs are logged and the loop
    /// keeps going. Returns the number of runs started.
    pub async fn run<F>(self, shutdown: F) -> u64
    where
        F: Future<Output = ()> + Send,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!(interval_secs = self.interval.as_secs(), "scheduler started");
        let mut runs: u64 = 0;
        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = ticker.tick() => {
                    runs = runs.saturating_add(1);
                    match self.service.collect().await {
                        Ok(summary) => tracing::info!(
                            run_id = %summary.run_id,
                            round = summary.participation.current_round,
                            "scheduled collection finished"
                        ),
                        Err(err) => tracing::warn!(error = %err, "scheduled collection failed"),
                    }
                }
            }
        }
        tracing::info!(runs, "scheduler stopped");
        runs
    }
}
