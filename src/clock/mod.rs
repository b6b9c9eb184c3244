//! Wall-clock sources for the "last updated" display.
//!
//! The dashboard never refetches data; the only periodic work is publishing
//! the current time. A [`Clock`] is polled once per UI loop iteration and
//! yields a timestamp whenever a new tick has arrived.

mod channel;
mod ticker;

pub use channel::ChannelClock;
pub use ticker::TickerClock;

use std::fmt::Debug;

use chrono::{DateTime, Local};

/// Trait for receiving clock ticks.
///
/// # Example
///
/// ```
/// use careconnect::{ChannelClock, Clock};
/// use chrono::Local;
///
/// let (tx, mut clock) = ChannelClock::create("manual");
/// tx.send(Local::now()).unwrap();
/// assert!(clock.poll().is_some());
/// ```
pub trait Clock: Send + Debug {
    /// Return the latest tick if one arrived since the last poll.
    ///
    /// Must not block.
    fn poll(&mut self) -> Option<DateTime<Local>>;

    /// Human-readable description, shown in the status bar.
    fn description(&self) -> &str;

    /// Error message if the clock can no longer tick.
    fn error(&self) -> Option<&str>;

    /// Stop producing ticks. Called on teardown.
    fn stop(&mut self) {}
}
