/*
[INPUT]:  Wall-clock time
[OUTPUT]: Millisecond timestamps used as request nonces
[POS]:    Auth layer - nonce source
[UPDATE]: When nonce generation changes
*/

use std::fmt::Debug;

use chrono::Utc;

/// Source of the current time in epoch millis
pub trait Clock: Send + Sync + Debug {
    fn now_millis(&self) -> u64;
}

/// Wall clock. Concurrent calls may observe equal values; no collision guard.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }

    #[test]
    fn fixed_clock_is_fixed() {
        let clock = FixedClock(42);
        assert_eq!(clock.now_millis(), clock.now_millis());
    }
}
