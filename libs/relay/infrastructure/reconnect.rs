//! Reconnection strategies

use std::time::Duration;

/// Decides how long to wait before the next connection attempt
pub trait ReconnectionStrategy: Send + Sync {
    /// Delay before attempt `attempt` (0-indexed), `None` to give up
    fn next_delay(&self, attempt: usize) -> Option<Duration>;
}

/// Always waits the same amount of time between attempts
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay: Duration,
    max_attempts: Option<usize>,
}

impl FixedDelay {
    /// # Arguments
    /// * `delay` - The fixed delay between attempts
    /// * `max_attempts` - Maximum number of attempts (None = unlimited)
    pub fn new(delay: Duration, max_attempts: Option<usize>) -> Self {
        Self { delay, max_attempts }
    }

    pub fn unbounded(delay: Duration) -> Self {
        Self::new(delay, None)
    }
}

impl ReconnectionStrategy for FixedDelay {
    fn next_delay(&self, attempt: usize) -> Option<Duration> {
        if self.max_attempts.map_or(true, |max| attempt < max) {
            Some(self.delay)
        } else {
            None
        }
    }
}
