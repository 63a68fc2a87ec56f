//! Cooperative repeating timer.
//!
//! There is no background thread: the owner polls the timer from its own
//! event loop and gets `true` once per elapsed interval. Missed intervals are
//! coalesced into a single firing.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    interval: Duration,
    next_due: Instant,
    cancelled: bool,
}

impl RepeatingTimer {
    /// Start a timer whose first firing is one `interval` after `now`.
    pub fn start(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
            cancelled: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` if the timer is due at `now`, and schedules the next firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.cancelled || now < self.next_due {
            return false;
        }
        self.next_due = now + self.interval;
        true
    }

    /// Time left until the next firing, `None` once cancelled.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        if self.cancelled {
            return None;
        }
        Some(self.next_due.saturating_duration_since(now))
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_interval_and_coalesces() {
        let t0 = Instant::now();
        let step = Duration::from_millis(500);
        let mut timer = RepeatingTimer::start(step, t0);
        assert!(!timer.poll(t0));
        assert!(!timer.poll(t0 + Duration::from_millis(499)));
        assert!(timer.poll(t0 + step));
        assert!(!timer.poll(t0 + step));
        // Three intervals late still fires only once.
        assert!(timer.poll(t0 + step * 4));
        assert!(!timer.poll(t0 + step * 4 + Duration::from_millis(1)));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let t0 = Instant::now();
        let mut timer = RepeatingTimer::start(Duration::from_millis(10), t0);
        timer.cancel();
        assert!(!timer.poll(t0 + Duration::from_secs(1)));
        assert_eq!(timer.time_until_due(t0), None);
    }
}
