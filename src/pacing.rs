//! Token-paced call sequencing for external search traffic.
//!
//! Every externally rate-limited call (each search query within a run, and
//! each pair within a batch) goes through one shared [`Pacer`], so both
//! paths observe the same minimum spacing. Waiting suspends the task via
//! [`tokio::time::sleep`]; no executor thread is blocked and the first call
//! in a sequence passes through immediately.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum delay between successive paced calls.
#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl Pacer {
    /// Create a pacer with the given minimum spacing in milliseconds.
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            last_call: Mutex::new(None),
        }
    }

    /// The configured minimum spacing.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait until the minimum spacing since the previous paced call has
    /// elapsed, then mark this call as the new reference point.
    ///
    /// The first call never waits; a call that arrives after the spacing has
    /// already elapsed proceeds immediately.
    pub async fn pace(&self) {
        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.delay {
                tokio::time::sleep(self.delay - elapsed).await;
            }
        }
        *last_call = Some(Instant::now());
    }
}
