use std::time::Duration;

use crate::timers::{TimerId, Timers};

/// Collapses a burst of triggers into a single timer firing `interval` after
/// the last trigger.
#[derive(Debug)]
pub struct Debounce {
    interval: Duration,
    pending: Option<TimerId>,
}

impl Debounce {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Restarts the quiet period.
    pub fn trigger(&mut self, timers: &mut dyn Timers) {
        if let Some(previous) = self.pending.take() {
            timers.cancel(previous);
        }
        self.pending = Some(timers.schedule(self.interval));
    }

    /// Returns true exactly once, for the timer scheduled by the latest
    /// [`trigger`](Self::trigger).
    pub fn take_fired(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self, timers: &mut dyn Timers) {
        if let Some(previous) = self.pending.take() {
            timers.cancel(previous);
        }
    }
}

#[cfg(test)]
#[path = "tests/debounce_tests.rs"]
mod tests;
