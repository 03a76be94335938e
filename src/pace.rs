//! Pacing between consecutive tw calls.
//!
//! The platform applies rate limits to provisioning traffic, so the
//! dispatcher waits between one call and the next.  The wait is a strategy
//! ([`Pacer`]) rather than a hard-coded sleep, which keeps the test suites
//! fast and lets a dry run walk the file at full speed.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Waits between two consecutive dispatches.
pub trait Pacer: Send + Sync {
    /// Called once between one dispatch and the next, never before the
    /// first or after the last.
    fn pause(&self);
}

/// Sleeps for a fixed interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedDelay {
    interval: Duration,
}

impl FixedDelay {
    /// Creates a pacer sleeping for `interval` between dispatches.
    pub fn new(interval: Duration) -> Self {
        FixedDelay { interval }
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for FixedDelay {
    /// Three seconds, the spacing the platform expects between successive
    /// provisioning calls.
    fn default() -> Self {
        FixedDelay::new(Duration::from_secs(3))
    }
}

impl Pacer for FixedDelay {
    fn pause(&self) {
        std::thread::sleep(self.interval);
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn pause(&self) {}
}

/// Counts pauses without waiting.
///
/// Clones share the same counter, so a test can hand one clone to a
/// dispatcher and read the count from the other afterwards.
#[derive(Clone, Default)]
pub struct CountingPacer {
    count: Arc<AtomicUsize>,
}

impl CountingPacer {
    /// Creates a pacer with a zeroed counter.
    pub fn new() -> Self {
        CountingPacer {
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times `pause` has been called.
    pub fn pauses(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

impl Pacer for CountingPacer {
    fn pause(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_interval_is_three_seconds() {
        assert_eq!(FixedDelay::default().interval(), Duration::from_secs(3));
    }

    #[test]
    fn counting_pacer_shares_its_counter() {
        let pacer = CountingPacer::new();
        let clone = pacer.clone();
        clone.pause();
        clone.pause();
        assert_eq!(pacer.pauses(), 2);
    }

    #[test]
    fn no_delay_returns_immediately() {
        let start = std::time::Instant::now();
        NoDelay.pause();
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
