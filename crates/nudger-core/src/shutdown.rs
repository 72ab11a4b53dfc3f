//! Cooperative cancellation.
//!
//! A [`Shutdown`] token is shared between the signal listener and the loop.
//! Sleeping through it returns early with [`Cancelled`] once triggered.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

use crate::error::Cancelled;

/// Suspends the loop between reminders.
pub trait Sleeper {
    /// Sleep for `duration`, or return `Err(Cancelled)` if shutdown fires first.
    fn sleep(&mut self, duration: Duration) -> Result<(), Cancelled>;
}

#[derive(Debug, Default)]
struct Flag {
    triggered: Mutex<bool>,
    wake: Condvar,
}

/// Cloneable shutdown token.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    flag: Arc<Flag>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown and wake every waiter.
    pub fn trigger(&self) {
        let mut triggered = self
            .flag
            .triggered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *triggered = true;
        self.flag.wake.notify_all();
    }

    pub fn is_triggered(&self) -> bool {
        *self
            .flag
            .triggered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Block for up to `duration`. Returns `Err(Cancelled)` if triggered.
    pub fn wait(&self, duration: Duration) -> Result<(), Cancelled> {
        let guard = self
            .flag
            .triggered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (guard, _timeout) = self
            .flag
            .wake
            .wait_timeout_while(guard, duration, |triggered| !*triggered)
            .unwrap_or_else(PoisonError::into_inner);
        if *guard {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Sleeper for Shutdown {
    fn sleep(&mut self, duration: Duration) -> Result<(), Cancelled> {
        self.wait(duration)
    }
}
