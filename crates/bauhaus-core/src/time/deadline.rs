use std::time::{Duration, Instant};

/// Single-threaded, cancellable deadline. At most one is pending; arming
/// again supersedes the previous deadline. The owner polls `fire_due`
/// from its update tick, so dropping the owner drops the deadline with it.
#[derive(Debug, Default)]
pub struct CommitDeadline {
    due: Option<Instant>,
}

impl CommitDeadline {
    pub fn new() -> Self {
        Self { due: None }
    }

    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    /// Returns true when a pending deadline was dropped.
    pub fn cancel(&mut self) -> bool {
        self.due.take().is_some()
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    /// Clears and reports an expired deadline. A deadline fires exactly once.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
