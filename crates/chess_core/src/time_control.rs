//! Cancellation token shared by search workers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// How often (in nodes) workers look at the clock.
pub const CHECK_INTERVAL: u64 = 1024;

/// Thread-safe time controller that tracks whether search should stop.
///
/// Clones share the stop flag, so one `stop()` or expired deadline halts
/// every worker. The `is_stopped()` check is a relaxed atomic load and can
/// be called on every node.
#[derive(Debug, Clone)]
pub struct TimeControl {
    /// Shared stop flag
    stopped: Arc<AtomicBool>,
    /// When the clock started; set at construction.
    started: Instant,
    /// Time limit for this search (None = infinite)
    time_limit: Option<Duration>,
    check_interval: u64,
}

impl TimeControl {
    /// Creates a controller whose clock starts now.
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            started: Instant::now(),
            time_limit,
            check_interval: CHECK_INTERVAL,
        }
    }

    /// Force stop the search immediately.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Sets the stop flag once the deadline has passed. Returns whether the
    /// search should stop.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }

        if let Some(limit) = self.time_limit
            && self.started.elapsed() >= limit
        {
            self.stop();
            return true;
        }

        false
    }

    /// Returns true every `check_interval` nodes.
    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes.is_multiple_of(self.check_interval)
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
