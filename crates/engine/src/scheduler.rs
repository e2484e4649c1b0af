//! Gravity scheduler - cancellable periodic trigger owned by a session
//!
//! Wraps a tokio interval whose first tick fires after an initial delay. Once
//! cancelled, `tick` never resolves again, so it can stay in a `select!` loop.

use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

#[derive(Debug)]
pub struct GravityScheduler {
    interval: Option<Interval>,
}

impl GravityScheduler {
    /// Start ticking every `period`, first tick after `initial_delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(initial_delay: Duration, period: Duration) -> Self {
        let mut interval = time::interval_at(Instant::now() + initial_delay, period);
        // A stalled worker must not replay a burst of gravity steps
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval: Some(interval),
        }
    }

    /// Wait for the next tick; pending forever once cancelled
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }

    pub fn cancel(&mut self) {
        self.interval = None;
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }
}
