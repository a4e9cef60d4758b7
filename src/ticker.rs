use std::time::{Duration, Instant};

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Turns wall-clock time into whole-second ticks.
///
/// The anchor only advances by whole seconds, so a late frame carries its
/// remainder into the next call instead of dropping it.
#[derive(Debug, Clone)]
pub struct SecondTicker {
    anchor: Instant,
}

impl SecondTicker {
    pub fn new(now: Instant) -> Self {
        Self { anchor: now }
    }

    pub fn restart(&mut self, now: Instant) {
        self.anchor = now;
    }

    /// Whole seconds elapsed since the last call
    pub fn due(&mut self, now: Instant) -> u64 {
        let secs = now.saturating_duration_since(self.anchor).as_secs();
        self.anchor += Duration::from_secs(secs);
        secs
    }
}

/// Fires at most once per `interval`
#[derive(Debug, Clone)]
pub struct Interval {
    interval: Duration,
    last: Instant,
}

impl Interval {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self { interval, last: now }
    }

    pub fn ready(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        let duration = tick_duration();
        assert_eq!(duration, Duration::from_millis(250));
    }

    #[test]
    fn test_second_ticker_carries_remainder() {
        let start = Instant::now();
        let mut ticker = SecondTicker::new(start);
        assert_eq!(ticker.due(start + Duration::from_millis(700)), 0);
        assert_eq!(ticker.due(start + Duration::from_millis(1400)), 1);
        assert_eq!(ticker.due(start + Duration::from_millis(2100)), 1);
        assert_eq!(ticker.due(start + Duration::from_millis(5000)), 3);
    }

    #[test]
    fn test_interval() {
        let start = Instant::now();
        let mut every = Interval::new(Duration::from_secs(60), start);
        assert!(!every.ready(start + Duration::from_secs(59)));
        assert!(every.ready(start + Duration::from_secs(60)));
        assert!(!every.ready(start + Duration::from_secs(90)));
        assert!(every.ready(start + Duration::from_secs(121)));
    }
}
