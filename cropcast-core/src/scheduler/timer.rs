//! Elapsed-time gate for a periodic task

/// Interval gate over a millisecond clock
///
/// Firing resets the timer to the time it fired at, not to the previous
/// deadline, so lateness is absorbed rather than caught up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntervalTimer {
    interval_ms: u64,
    last_ms: u64,
}

impl IntervalTimer {
    /// Create a timer last fired at time zero
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms as u64,
            last_ms: 0,
        }
    }

    /// Restart the interval from `now_ms`
    pub fn arm(&mut self, now_ms: u64) {
        self.last_ms = now_ms;
    }

    /// Milliseconds since the timer last fired
    pub fn elapsed(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_ms)
    }

    /// Fire if at least one interval has elapsed
    pub fn fire_if_elapsed(&mut self, now_ms: u64) -> bool {
        let due = self.elapsed(now_ms) >= self.interval_ms;
        if due {
            self.arm(now_ms);
        }
        due
    }

    /// Fire if strictly more than one interval has elapsed
    pub fn fire_if_exceeded(&mut self, now_ms: u64) -> bool {
        let due = self.elapsed(now_ms) > self.interval_ms;
        if due {
            self.arm(now_ms);
        }
        due
    }
}
