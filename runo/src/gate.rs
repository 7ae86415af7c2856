//! Rendezvous between the game-logic thread and the front end.
//!
//! The game-logic thread parks in [`Gate::wait`] until the front end calls [`Gate::release`].
//! Waking consumes the signal, so the gate is armed again for the next wait. A release that
//! arrives before anyone waits is kept and satisfies the next wait; further releases before that
//! wait collapse into the same single signal.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use tracing::trace;

#[derive(Debug, Default)]
pub struct Gate {
    signaled: Mutex<bool>,
    condvar: Condvar,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until released, then re-arms.
    pub fn wait(&self) {
        let mut signaled = self.lock();
        while !*signaled {
            signaled = self
                .condvar
                .wait(signaled)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *signaled = false;
        trace!("gate passed");
    }

    pub fn release(&self) {
        *self.lock() = true;
        self.condvar.notify_one();
        trace!("gate released");
    }

    pub fn is_signaled(&self) -> bool {
        *self.lock()
    }

    // A panicking holder can only have left a plain bool behind.
    fn lock(&self) -> MutexGuard<'_, bool> {
        self.signaled.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
