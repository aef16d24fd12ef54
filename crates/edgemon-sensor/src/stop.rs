//! Cooperative stop flag for the sampling loop.
//!
//! The loop checks the flag between samples and waits on it instead of
//! sleeping, so a trigger (Ctrl-C in the binary, a timer in tests) ends the
//! run within one write, not one interval.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

#[derive(Debug, Default)]
struct Inner {
    stopped: Mutex<bool>,
    cond: Condvar,
}

/// Shared, clonable stop flag. Once triggered it stays triggered.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    inner: Arc<Inner>,
}

impl StopSignal {
    /// A fresh, untriggered signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop and wake any waiter.
    pub fn trigger(&self) {
        let mut stopped = self.inner.stopped.lock();
        *stopped = true;
        self.inner.cond.notify_all();
    }

    /// Whether a stop has been requested.
    pub fn is_triggered(&self) -> bool {
        *self.inner.stopped.lock()
    }

    /// Block for up to `timeout`, returning early if triggered.
    ///
    /// Returns `true` if the signal is triggered when the wait ends. A
    /// timeout past the clock's range waits for the trigger alone.
    pub fn wait(&self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        let mut stopped = self.inner.stopped.lock();
        while !*stopped {
            match deadline {
                Some(deadline) => {
                    if self.inner.cond.wait_until(&mut stopped, deadline).timed_out() {
                        break;
                    }
                }
                None => self.inner.cond.wait(&mut stopped),
            }
        }
        *stopped
    }
}
