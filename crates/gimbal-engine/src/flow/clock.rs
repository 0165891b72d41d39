use std::time::{Duration, Instant};

/// Source of real time for the flow loop.
///
/// The loop never reads `Instant::now()` directly; going through the trait
/// lets tests drive catch-up arithmetic with a manual clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    /// Blocks the calling thread for roughly `duration`. A short or
    /// interrupted sleep means "wake immediately", never an error.
    fn sleep(&self, duration: Duration);
}

/// Wall-clock implementation used outside of tests.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }

    #[inline]
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
