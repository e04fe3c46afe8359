// Debounced recomputation
//
// Keystrokes arrive faster than the metrics should recompute. Each
// submitted value replaces the pending one and restarts the quiet
// period; polling after the deadline hands back only the survivor,
// exactly once. One global slot - there is no per-key debouncing.

use std::time::{Duration, Instant};

/// Default quiet period after the last keystroke.
pub const DEFAULT_QUIET: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy)]
struct Pending {
    value: f64,
    deadline: Instant,
}

/// Single-slot cancellable timer: the newest submission wins.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    pending: Option<Pending>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Submit a value, replacing any pending one and restarting the
    /// quiet period.
    pub fn submit(&mut self, value: f64, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.quiet,
        });
    }

    /// Take the pending value once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<f64> {
        match self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending = None;
                Some(pending.value)
            }
            _ => None,
        }
    }

    /// Whether a recomputation is scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET)
    }
}
