//! Clock implementations.
//!
//! [`MonotonicClock`] is the production source backed by [`Instant`].
//! [`ManualClock`] only moves when told to, which keeps frame-by-frame
//! simulations and tests deterministic.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::traits::Clock;

/// Real monotonic time, measured from the moment the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock with nanosecond resolution.
///
/// Share it through `Arc<ManualClock>` (or a reference) to advance time
/// while an engine owns a handle to the same clock.
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicU64,
}

impl ManualClock {
    /// A clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `delta`, saturating at the representable maximum.
    pub fn advance(&self, delta: Duration) {
        let delta = u64::try_from(delta.as_nanos()).unwrap_or(u64::MAX);
        let _ = self
            .nanos
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| Some(n.saturating_add(delta)));
    }

    /// Move time forward by a number of seconds. Negative or non-finite values are ignored.
    pub fn advance_secs(&self, secs: f64) {
        if let Ok(delta) = Duration::try_from_secs_f64(secs) {
            self.advance(delta);
        }
    }

    /// Jump to an absolute time. Moving backwards is ignored.
    pub fn set(&self, at: Duration) {
        let at = u64::try_from(at.as_nanos()).unwrap_or(u64::MAX);
        self.nanos.fetch_max(at, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn monotonic_never_goes_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn manual_starts_at_zero() {
        assert_eq!(ManualClock::new().now(), Duration::ZERO);
    }

    #[test]
    fn manual_advance_accumulates() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_millis(250));
        clock.advance_secs(0.75);
        assert_eq!(clock.now(), Duration::from_secs(1));
    }

    #[test]
    fn manual_ignores_bad_seconds() {
        let clock = ManualClock::new();
        clock.advance_secs(-1.0);
        clock.advance_secs(f64::NAN);
        assert_eq!(clock.now(), Duration::ZERO);
    }

    #[test]
    fn manual_set_is_monotonic() {
        let clock = ManualClock::new();
        clock.set(Duration::from_secs(5));
        clock.set(Duration::from_secs(2));
        assert_eq!(clock.now(), Duration::from_secs(5));
    }

    #[test]
    fn shared_handle_sees_advances() {
        let clock = Arc::new(ManualClock::new());
        let handle = Arc::clone(&clock);
        clock.advance(Duration::from_secs(3));
        assert_eq!(handle.now(), Duration::from_secs(3));
        assert_eq!((&*clock).now(), Duration::from_secs(3));
    }
}
