//! Wall-clock access for replay pacing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Source of "now" and the only place replay blocks.
pub trait ReplayClock {
    fn now(&self) -> Instant;

    /// Block until `deadline`. Returns immediately if it already passed.
    fn sleep_until(&self, deadline: Instant);
}

/// The real monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ReplayClock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep_until(&self, deadline: Instant) {
        let wait = deadline.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
    }
}

/// A simulated clock that only moves when told to.
///
/// Sleeping jumps the clock forward to the deadline instead of blocking, and
/// every non-zero wait is recorded. Clones share the same time, so a test can
/// keep one handle while the player owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    state: Arc<Mutex<ManualState>>,
}

#[derive(Debug)]
struct ManualState {
    start: Instant,
    now: Instant,
    sleeps: Vec<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        let start = Instant::now();
        Self {
            state: Arc::new(Mutex::new(ManualState {
                start,
                now: start,
                sleeps: Vec::new(),
            })),
        }
    }

    /// Move the clock forward, e.g. to simulate slow processing.
    pub fn advance(&self, by: Duration) {
        self.lock().now += by;
    }

    /// Simulated time elapsed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        let state = self.lock();
        state.now - state.start
    }

    /// Every non-zero wait performed so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.lock().sleeps.clone()
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayClock for ManualClock {
    fn now(&self) -> Instant {
        self.lock().now
    }

    fn sleep_until(&self, deadline: Instant) {
        let mut state = self.lock();
        if deadline > state.now {
            let wait = deadline - state.now;
            state.sleeps.push(wait);
            state.now = deadline;
        }
    }
}
