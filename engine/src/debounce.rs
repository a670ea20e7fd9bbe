//! Debounced scheduler — coalesces a burst of input events into a single
//! delayed action.
//!
//! Generation-counter scheme: every [`Debouncer::schedule`] bumps the
//! generation and spawns a timer task; when the timer elapses, the task
//! runs its action only if its generation is still current. Only the last
//! scheduled action in a burst ever runs. The timer callback runs on the
//! same cooperative executor as the input events, never concurrently with
//! them.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default delay before a scheduled action fires.
pub const DEBOUNCE_MS: u64 = 250;

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Debouncer::new(Duration::from_millis(DEBOUNCE_MS))
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer { delay, generation: Arc::new(AtomicU64::new(0)) }
    }

    /// Restart the delay timer; `action` runs exactly once if the delay
    /// elapses with no intervening `schedule` or `cancel_pending`.
    pub fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.generation);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if latest.load(Ordering::SeqCst) == generation {
                action.await;
            }
        });
    }

    /// Abandon any pending action without scheduling a new one. Used by the
    /// submit path so an immediate dispatch is not followed by a redundant
    /// debounced one.
    pub fn cancel_pending(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
