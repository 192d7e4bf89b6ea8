//! Fixed-interval cooperative scheduler.
//!
//! Single-task loop: sleep in coarse increments, check whether the next fire
//! time has arrived, run the job to completion, then schedule the next fire
//! relative to completion. Cycles never overlap; a slow job delays, but never
//! skips into, the next fire. The first fire waits one full interval.

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Default gap between cycles.
pub const DEFAULT_INTERVAL_MINUTES: u64 = 6;

/// How often the loop wakes up to check the clock.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Fires a job every fixed interval, forever.
#[derive(Debug, Clone)]
pub struct Scheduler {
    interval: Duration,
    poll_interval: Duration,
}

impl Scheduler {
    /// Create a scheduler firing every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the clock-check granularity.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Run `job` every interval, forever. Never returns.
    ///
    /// The job factory is called once per fire; each invocation runs to
    /// completion before the next fire is scheduled.
    pub async fn run<F, Fut>(&self, mut job: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut next_fire = Instant::now() + self.interval;

        loop {
            if Instant::now() >= next_fire {
                job().await;
                next_fire = Instant::now() + self.interval;
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
