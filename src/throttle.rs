//! Inter-request pacing for upstream API calls.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::state::NotKeyed;
use governor::{Quota, RateLimiter};

const GATE_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Gate acquired after each per-member lookup to pace upstream requests.
pub trait RequestGate {
    /// Blocks until the next request may be issued.
    fn acquire(&self);
}

/// Minimum-interval gate backed by a direct `governor` limiter.
pub struct MinIntervalGate {
    limiter: RateLimiter<NotKeyed, governor::state::InMemoryState, governor::clock::DefaultClock>,
}

impl MinIntervalGate {
    /// Creates a gate admitting one request per `min_interval`.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            limiter: RateLimiter::direct(
                Quota::with_period(min_interval)
                    .expect("valid gate period")
                    .allow_burst(NonZeroU32::new(1).expect("non-zero gate burst")),
            ),
        }
    }
}

impl RequestGate for MinIntervalGate {
    fn acquire(&self) {
        while self.limiter.check().is_err() {
            std::thread::sleep(GATE_POLL_INTERVAL);
        }
    }
}

/// Pass-through gate for tests and dry runs.
pub struct NoGate;

impl RequestGate for NoGate {
    fn acquire(&self) {}
}
