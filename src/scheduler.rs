use std::time::{Duration, Instant};

/// Coalesces recompute triggers into at most one recomputation per debounce
/// window. The scheduler owns no timer: the host calls [`trigger`] when a
/// mutation batch arrives and [`poll`] from whatever tick it already has
/// (an animation frame, a timeout), running a layout pass when `poll`
/// reports due.
///
/// [`trigger`]: RecomputeScheduler::trigger
/// [`poll`]: RecomputeScheduler::poll
#[derive(Debug)]
pub struct RecomputeScheduler {
    window: Duration,
    due: Option<Instant>,
}

impl RecomputeScheduler {
    pub fn new(window: Duration) -> Self {
        Self { window, due: None }
    }

    pub fn from_millis(window_ms: u64) -> Self {
        Self::new(Duration::from_millis(window_ms))
    }

    /// Ask for a recompute. The first trigger of a burst schedules one at
    /// `now + window`; triggers landing inside the window fold into it.
    pub fn trigger(&mut self, now: Instant) {
        if self.due.is_none() {
            self.due = Some(now + self.window);
        }
    }

    /// True exactly once per elapsed window with pending triggers; the
    /// caller should run a layout pass when it gets `true`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Drop any pending recompute (overlay disabled mid-burst).
    pub fn cancel(&mut self) {
        self.due = None;
    }
}
