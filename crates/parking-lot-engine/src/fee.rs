//! Fee computation on exit

use chrono::TimeDelta;
use parking_lot_core::DEFAULT_HOURLY_RATE;

const SECONDS_PER_HOUR: u64 = 3600;

/// Amount charged for one stay
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Fee {
    /// Started hours, at least one
    pub billed_hours: u64,
    /// `billed_hours` times the hourly rate
    pub amount: u64,
}

/// Hourly billing with a one-hour minimum
///
/// Every started hour is billed in full: a stay of one second costs the same
/// as a stay of 59 minutes and 59 seconds, and 61 minutes are two hours.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FeePolicy {
    hourly_rate: u32,
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_HOURLY_RATE)
    }
}

impl FeePolicy {
    /// Create a new [`FeePolicy`].
    pub fn new(hourly_rate: u32) -> Self {
        Self { hourly_rate }
    }

    pub fn hourly_rate(&self) -> u32 {
        self.hourly_rate
    }

    /// Compute the fee for a stay of `elapsed`.
    ///
    /// Only whole seconds count. A negative duration (the clock went
    /// backwards) bills the minimum.
    pub fn charge(&self, elapsed: TimeDelta) -> Fee {
        let secs = elapsed.num_seconds().max(0) as u64;
        let billed_hours = secs.div_ceil(SECONDS_PER_HOUR).max(1);
        Fee {
            billed_hours,
            amount: billed_hours.saturating_mul(self.hourly_rate as u64),
        }
    }
}
