/// Countdown timer for throttling periodic work inside a tick (e.g. transport pose pushes).
///
/// Starts expired so the first check after construction passes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntervalTimer {
    remaining_ms: i64,
}

impl IntervalTimer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            remaining_ms: interval_ms as i64,
        }
    }

    /// Consume `diff_ms` of elapsed time.
    #[inline]
    pub fn update(&mut self, diff_ms: u32) {
        self.remaining_ms -= diff_ms as i64;
    }

    #[inline]
    pub fn passed(&self) -> bool {
        self.remaining_ms <= 0
    }

    /// Restart the countdown. Overshoot is dropped, not carried into the next interval.
    #[inline]
    pub fn reset(&mut self, interval_ms: u32) {
        self.remaining_ms = interval_ms as i64;
    }
}
