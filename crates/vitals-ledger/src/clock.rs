//! Time sources for block timestamps.
//!
//! Timestamps are integer Unix milliseconds. The ledger reads them through
//! [`Clock`] so tests can pin or step time.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of Unix-millisecond timestamps.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        // A clock set before 1970 reads as negative time rather than failing.
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_millis() as i64,
            Err(e) => -(e.duration().as_millis() as i64),
        }
    }
}

/// A manually driven clock. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
    step: i64,
}

impl ManualClock {
    /// Start at `start` and stay there until moved.
    pub fn new(start: i64) -> Self {
        Self::stepping(start, 0)
    }

    /// Start at `start` and advance by `step` after every read.
    pub fn stepping(start: i64, step: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start)),
            step,
        }
    }

    /// Jump to an absolute time.
    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    /// Move forward by `millis`.
    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }

    /// Current time without stepping.
    pub fn peek(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.fetch_add(self.step, Ordering::SeqCst)
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_after_2024() {
        assert!(SystemClock.now_millis() > 1_704_067_200_000);
    }

    #[test]
    fn test_manual_clock_fixed() {
        let clock = ManualClock::new(1000);
        assert_eq!(clock.now_millis(), 1000);
        assert_eq!(clock.now_millis(), 1000);
        clock.advance(5);
        assert_eq!(clock.now_millis(), 1005);
        clock.set(7);
        assert_eq!(clock.peek(), 7);
    }

    #[test]
    fn test_manual_clock_stepping() {
        let clock = ManualClock::stepping(1000, 10);
        assert_eq!(clock.now_millis(), 1000);
        assert_eq!(clock.now_millis(), 1010);
        assert_eq!(clock.peek(), 1020);
    }

    #[test]
    fn test_clones_share_time() {
        let a = ManualClock::new(0);
        let b = a.clone();
        a.advance(42);
        assert_eq!(b.now_millis(), 42);
    }
}
