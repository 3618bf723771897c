//! Time source used to stamp `dt_created`/`dt_updated` values.
//!
//! All timestamps in this crate are Unix epoch milliseconds.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Epoch milliseconds.
pub type EpochMillis = i64;

/// Current-time provider injected into repositories and handlers.
pub trait Clock {
    fn now_ms(&self) -> EpochMillis;
}

/// Wall clock backed by `SystemTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> EpochMillis {
        // A clock set before 1970 reads as the epoch itself.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Deterministic clock for tests and replays.
///
/// Every read returns the current value and then advances it by `step_ms`.
#[derive(Debug, Clone)]
pub struct FixedClock {
    next: Cell<EpochMillis>,
    step_ms: EpochMillis,
}

impl FixedClock {
    /// Clock that always returns `at`.
    pub fn at(at: EpochMillis) -> Self {
        Self::stepping(at, 0)
    }

    /// Clock that starts at `start` and advances `step_ms` per read.
    pub fn stepping(start: EpochMillis, step_ms: EpochMillis) -> Self {
        Self {
            next: Cell::new(start),
            step_ms,
        }
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> EpochMillis {
        let current = self.next.get();
        self.next.set(current.saturating_add(self.step_ms));
        current
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock, SystemClock};

    #[test]
    fn fixed_clock_steps_forward_per_read() {
        let clock = FixedClock::stepping(1_000, 10);
        assert_eq!(clock.now_ms(), 1_000);
        assert_eq!(clock.now_ms(), 1_010);
        assert_eq!(clock.now_ms(), 1_020);
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }
}
