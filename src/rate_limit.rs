//! Request pacing for NCBI E-utilities
//!
//! NCBI blocks clients that exceed roughly three requests per second without
//! an API key. Each stage issues one request per identifier, so consecutive
//! requests are spaced by a fixed minimum interval.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, instrument};

/// Minimum-interval rate limiter
///
/// Cloned limiters share the same dispatch clock.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_dispatch: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// Create a limiter that keeps at least `min_interval` between dispatches
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use pubmed_report::rate_limit::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(Duration::from_millis(200));
    /// assert_eq!(limiter.min_interval(), Duration::from_millis(200));
    /// ```
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_dispatch: Arc::new(Mutex::new(None)),
        }
    }

    /// Limiter that never waits
    pub fn unlimited() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the next request may be dispatched, then claim the slot
    ///
    /// The first call returns immediately.
    #[instrument(skip(self))]
    pub async fn acquire(&self) {
        let mut last = self.last_dispatch.lock().await;

        if let Some(previous) = *last {
            let ready_at = previous + self.min_interval;
            if ready_at > Instant::now() {
                debug!(
                    wait_ms = ready_at.saturating_duration_since(Instant::now()).as_millis() as u64,
                    "Waiting before next request"
                );
                sleep_until(ready_at).await;
            }
        }

        *last = Some(Instant::now());
    }
}
