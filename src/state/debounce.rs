//! Trailing-edge debounce driven by the frame loop.
//!
//! There are no timers in an immediate-mode UI; instead every frame polls the
//! debouncer with the current instant.

use web_time::{Duration, Instant};

/// Fires once, `delay` after the most recent `schedule` call.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// (Re)starts the countdown from `now`, discarding any pending deadline.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Returns `true` exactly once when the pending deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drops the pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before the pending deadline, for scheduling a repaint.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        assert!(!debouncer.poll(start));

        debouncer.schedule(start);
        assert!(debouncer.is_pending());
        assert!(!debouncer.poll(start + Duration::from_millis(499)));
        assert!(debouncer.poll(start + Duration::from_millis(500)));
        assert!(!debouncer.poll(start + Duration::from_millis(501)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_rapid_changes_coalesce() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let mut fired = 0;

        // Ten changes, 40ms apart, polled every 10ms for two seconds.
        for tick in 0..200u64 {
            let now = start + Duration::from_millis(tick * 10);
            if tick % 4 == 0 && tick < 40 {
                debouncer.schedule(now);
            }
            if debouncer.poll(now) {
                fired += 1;
            }
        }

        assert_eq!(fired, 1);
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        debouncer.schedule(start);
        debouncer.cancel();
        assert!(!debouncer.poll(start + Duration::from_secs(1)));
    }

    #[test]
    fn test_remaining() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        assert_eq!(debouncer.remaining(start), None);
        debouncer.schedule(start);
        assert_eq!(
            debouncer.remaining(start + Duration::from_millis(200)),
            Some(Duration::from_millis(300))
        );
        assert_eq!(
            debouncer.remaining(start + Duration::from_secs(2)),
            Some(Duration::ZERO)
        );
    }
}
