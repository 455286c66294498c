//! Fixed-rate tick scheduling driven by wall-clock deltas.

use std::time::Duration;

/// Turns elapsed time into a whole number of fixed-length ticks, carrying the
/// remainder to the next call.
#[derive(Clone, Debug)]
pub struct FixedTicker {
    step: Duration,
    carry: Duration,
    max_catch_up: u32,
}

impl FixedTicker {
    /// Ticks allowed in one `advance` before the backlog is dropped.
    pub const DEFAULT_MAX_CATCH_UP: u32 = 25;

    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / ticks_per_second.max(1),
            carry: Duration::ZERO,
            max_catch_up: Self::DEFAULT_MAX_CATCH_UP,
        }
    }

    pub fn with_max_catch_up(mut self, max: u32) -> Self {
        self.max_catch_up = max.max(1);
        self
    }

    #[inline]
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add `elapsed` and return how many ticks are due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.carry += elapsed;
        let due = (self.carry.as_nanos() / self.step.as_nanos()) as u64;
        if due > self.max_catch_up as u64 {
            log::warn!(
                "Tick backlog of {} steps, dropping all but {}",
                due,
                self.max_catch_up
            );
            self.carry = Duration::ZERO;
            return self.max_catch_up;
        }
        let due = due as u32;
        self.carry -= self.step * due;
        due
    }

    /// Time left until the next tick is due.
    #[inline]
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.carry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_carries_over() {
        let mut ticker = FixedTicker::new(100);
        assert_eq!(ticker.advance(Duration::from_millis(25)), 2);
        assert_eq!(ticker.until_next(), Duration::from_millis(5));
        assert_eq!(ticker.advance(Duration::from_millis(5)), 1);
        assert_eq!(ticker.advance(Duration::from_millis(9)), 0);
    }

    #[test]
    fn backlog_is_capped() {
        let mut ticker = FixedTicker::new(100).with_max_catch_up(4);
        assert_eq!(ticker.advance(Duration::from_secs(2)), 4);
        assert_eq!(ticker.until_next(), ticker.step());
    }
}
