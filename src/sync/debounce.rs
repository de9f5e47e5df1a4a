// File: src/sync/debounce.rs
use std::time::{Duration, Instant};

/// Quiescence window used between the phone and the watch.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// A single-flight timer. Arming it again before it fires moves the deadline
/// out instead of scheduling a second firing.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, deadline: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn arm(&mut self, now: Instant) -> Instant {
        let deadline = now + self.window;
        self.deadline = Some(deadline);
        deadline
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Disarms and returns true once `now` has reached the deadline.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_window() {
        let start = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(100));
        assert!(!d.fire_if_due(start));

        d.arm(start);
        assert!(!d.fire_if_due(start + Duration::from_millis(99)));
        assert!(d.fire_if_due(start + Duration::from_millis(100)));
        assert!(!d.fire_if_due(start + Duration::from_millis(500)));
    }

    #[test]
    fn rearming_pushes_deadline() {
        let start = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(100));
        d.arm(start);
        d.arm(start + Duration::from_millis(80));
        assert!(!d.fire_if_due(start + Duration::from_millis(120)));
        assert!(d.fire_if_due(start + Duration::from_millis(180)));
    }
}
