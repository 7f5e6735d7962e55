//! Trailing-edge debounce timer
//!
//! The timer is a deadline, not a callback: the owner asks whether it is due
//! and fires it. Re-arming replaces the deadline, so only the last of a burst
//! of events ever fires.

use std::time::{Duration, Instant};

/// Identifies one arming of a [`Debouncer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Sequence number of the arming (starts at 1)
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// A single restartable deadline
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<(TimerHandle, Instant)>,
    armed_count: u64,
}

impl Debouncer {
    /// Create an idle debouncer with the given quiet period
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            armed_count: 0,
        }
    }

    /// Quiet period
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending deadline and arm a new one at `now + delay`
    pub fn arm(&mut self, now: Instant) -> TimerHandle {
        self.armed_count += 1;
        let handle = TimerHandle(self.armed_count);
        self.deadline = Some((handle, now + self.delay));
        handle
    }

    /// Cancel the pending deadline, returning whether one was pending
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Handle of the pending deadline
    #[must_use]
    pub fn pending(&self) -> Option<TimerHandle> {
        self.deadline.map(|(handle, _)| handle)
    }

    /// When the pending deadline expires
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline.map(|(_, at)| at)
    }

    /// Whether the pending deadline has passed
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|(_, at)| now >= at)
    }

    /// Fire the deadline if it has passed; a fired deadline is consumed
    pub fn fire(&mut self, now: Instant) -> Option<TimerHandle> {
        if self.is_due(now) {
            self.deadline.take().map(|(handle, _)| handle)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn test_fires_after_delay() {
        let start = Instant::now();
        let mut timer = Debouncer::new(DELAY);
        let handle = timer.arm(start);

        assert_eq!(timer.fire(start + Duration::from_millis(499)), None);
        assert_eq!(timer.fire(start + DELAY), Some(handle));
        assert_eq!(timer.fire(start + DELAY), None);
    }

    #[test]
    fn test_rearm_supersedes_previous_deadline() {
        let start = Instant::now();
        let mut timer = Debouncer::new(DELAY);
        let first = timer.arm(start);
        let second = timer.arm(start + Duration::from_millis(300));

        assert_ne!(first, second);
        assert!(!timer.is_due(start + DELAY));
        assert_eq!(
            timer.fire(start + Duration::from_millis(800)),
            Some(second)
        );
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut timer = Debouncer::new(DELAY);
        timer.arm(start);

        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert_eq!(timer.fire(start + DELAY * 2), None);
        assert_eq!(timer.pending(), None);
    }
}
