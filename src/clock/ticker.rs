//! Periodic clock backed by a tokio task.

use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use super::{ChannelClock, Clock};

/// Smallest period accepted; tokio intervals cannot be zero.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A clock that publishes `Local::now()` every `period` from a background task.
///
/// The task is owned by the clock: [`Clock::stop`] aborts it, and dropping
/// the clock does the same.
///
/// Must be created from within a tokio runtime context.
///
/// ```
/// use std::time::Duration;
/// use careconnect::TickerClock;
///
/// # tokio_test::block_on(async {
/// let clock = TickerClock::spawn(Duration::from_secs(1));
/// assert!(clock.is_running());
/// # });
/// ```
#[derive(Debug)]
pub struct TickerClock {
    inner: ChannelClock,
    handle: Option<JoinHandle<()>>,
    period: Duration,
}

impl TickerClock {
    /// Start ticking. The first tick is published immediately.
    pub fn spawn(period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        let (tx, inner) = ChannelClock::create(&format!("every {}ms", period.as_millis()));

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let now = Local::now();
                trace!(%now, "tick");
                if tx.send(now).is_err() {
                    // Receiver dropped
                    break;
                }
            }
        });
        debug!(?period, "clock started");

        Self {
            inner,
            handle: Some(handle),
            period,
        }
    }

    /// Whether the background task is still owned by this clock.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Clock for TickerClock {
    fn poll(&mut self) -> Option<DateTime<Local>> {
        self.inner.poll()
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    fn error(&self) -> Option<&str> {
        self.inner.error()
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("clock stopped");
        }
    }
}

impl Drop for TickerClock {
    fn drop(&mut self) {
        self.stop();
    }
}
