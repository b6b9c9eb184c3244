//! Channel-based clock.
//!
//! Receives timestamps through a tokio watch channel. Used directly when the
//! caller drives time itself, and wrapped by [`super::TickerClock`].

use chrono::{DateTime, Local};
use tokio::sync::watch;

use super::Clock;

/// A clock that yields whatever timestamps are pushed into its channel.
///
/// Only the most recent unseen timestamp is returned; intermediate ticks
/// that arrive between polls are coalesced.
#[derive(Debug)]
pub struct ChannelClock {
    receiver: watch::Receiver<DateTime<Local>>,
    description: String,
    last_error: Option<String>,
}

impl ChannelClock {
    pub fn new(receiver: watch::Receiver<DateTime<Local>>, description: &str) -> Self {
        Self {
            receiver,
            description: format!("clock: {}", description),
            last_error: None,
        }
    }

    /// Create a sender/clock pair. The initial value counts as already seen.
    pub fn create(description: &str) -> (watch::Sender<DateTime<Local>>, Self) {
        let (tx, rx) = watch::channel(Local::now());
        (tx, Self::new(rx, description))
    }
}

impl Clock for ChannelClock {
    fn poll(&mut self) -> Option<DateTime<Local>> {
        match self.receiver.has_changed() {
            Ok(true) => Some(*self.receiver.borrow_and_update()),
            Ok(false) => None,
            Err(_) => {
                if self.last_error.is_none() {
                    self.last_error = Some("clock stopped".to_string());
                }
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
