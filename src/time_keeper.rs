//! Wall-clock budget for anytime searches.

use std::time::{Duration, Instant};

/// Tracks a deadline measured from the moment the keeper was created.
///
/// The check is a poll: callers ask between expansion steps, nothing is
/// interrupted mid-step.
#[derive(Debug, Clone, Copy)]
pub struct TimeKeeper {
    start_time: Instant,
    time_threshold: Duration,
}

impl TimeKeeper {
    /// Start a budget of `time_threshold_ms` milliseconds.
    pub fn new(time_threshold_ms: u64) -> Self {
        Self::with_threshold(Duration::from_millis(time_threshold_ms))
    }

    pub fn with_threshold(time_threshold: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            time_threshold,
        }
    }

    /// Time spent since the keeper was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    #[inline]
    pub fn is_time_over(&self) -> bool {
        self.elapsed() >= self.time_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_budget_is_immediately_over() {
        assert!(TimeKeeper::new(0).is_time_over());
    }

    #[test]
    fn test_long_budget_is_not_over() {
        let keeper = TimeKeeper::new(60_000);
        assert!(!keeper.is_time_over());
        assert!(keeper.elapsed() < Duration::from_secs(60));
    }

    #[test]
    fn test_budget_expires() {
        let keeper = TimeKeeper::new(1);
        std::thread::sleep(Duration::from_millis(5));
        assert!(keeper.is_time_over());
    }
}
