//! Subscription state of the single authorized user

use std::sync::atomic::{AtomicBool, Ordering};

/// Owner of the subscription flag.
///
/// Shared between the command dispatcher (the only writer) and the
/// evaluation cycle, which reads it before evaluating and again before
/// sending. Starts unsubscribed and lives as long as the process.
#[derive(Debug, Default)]
pub struct Session {
    subscribed: AtomicBool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed.load(Ordering::Acquire)
    }

    /// Returns `true` if this call changed the state.
    pub fn subscribe(&self) -> bool {
        !self.subscribed.swap(true, Ordering::AcqRel)
    }

    /// Returns `true` if this call changed the state.
    pub fn unsubscribe(&self) -> bool {
        self.subscribed.swap(false, Ordering::AcqRel)
    }
}
