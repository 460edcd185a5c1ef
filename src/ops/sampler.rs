use std::time::{Duration, Instant};

/// Shortest cadence accepted; keeps a misconfigured zero interval from
/// firing on every frame.
pub const MIN_SAMPLE_INTERVAL: Duration = Duration::from_millis(10);

/// Recurring progress timer, driven by deadlines rather than a thread.
///
/// The owner keeps it as an `Option<ProgressSampler>`: `Some` while playing,
/// `None` otherwise. Dropping the handle is cancellation, so a stopped
/// session cannot receive a late tick.
#[derive(Debug, Clone)]
pub struct ProgressSampler {
    interval: Duration,
    next_due: Instant,
    ticks: u64,
}

impl ProgressSampler {
    pub fn start(interval: Duration, now: Instant) -> Self {
        let interval = interval.max(MIN_SAMPLE_INTERVAL);
        Self {
            interval,
            next_due: now + interval,
            ticks: 0,
        }
    }

    /// Returns true when a tick is due at `now`, and schedules the next one.
    ///
    /// Missed deadlines collapse into a single tick, like a browser interval
    /// timer on a throttled tab.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        while self.next_due <= now {
            self.next_due += self.interval;
        }
        self.ticks += 1;
        true
    }

    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_does_not_fire_before_interval() {
        let t0 = Instant::now();
        let mut sampler = ProgressSampler::start(SECOND, t0);
        assert!(!sampler.fire_if_due(t0));
        assert!(!sampler.fire_if_due(t0 + Duration::from_millis(999)));
        assert_eq!(sampler.ticks(), 0);
    }

    #[test]
    fn test_fires_once_per_interval() {
        let t0 = Instant::now();
        let mut sampler = ProgressSampler::start(SECOND, t0);
        assert!(sampler.fire_if_due(t0 + SECOND));
        assert!(!sampler.fire_if_due(t0 + Duration::from_millis(1500)));
        assert!(sampler.fire_if_due(t0 + 2 * SECOND));
        assert_eq!(sampler.ticks(), 2);
    }

    #[test]
    fn test_missed_deadlines_collapse() {
        let t0 = Instant::now();
        let mut sampler = ProgressSampler::start(SECOND, t0);
        assert!(sampler.fire_if_due(t0 + Duration::from_millis(5500)));
        assert_eq!(sampler.ticks(), 1);
        assert_eq!(
            sampler.time_until_due(t0 + Duration::from_millis(5500)),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_zero_interval_is_raised_to_minimum() {
        let t0 = Instant::now();
        let sampler = ProgressSampler::start(Duration::ZERO, t0);
        assert_eq!(sampler.time_until_due(t0), MIN_SAMPLE_INTERVAL);
    }
}
