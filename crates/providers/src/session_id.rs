//! Session-number counter

use std::sync::atomic::{AtomicI32, Ordering};

use rand::Rng;

/// Source of consecutive session numbers
pub trait SessionIdProvider: Send + Sync {
    /// Next session number; always positive
    fn next_session_id(&self) -> i32;
}

/// Counter starting at a random positive offset.
///
/// The random start keeps session numbers from colliding across agent
/// restarts on the same device.
#[derive(Debug)]
pub struct DefaultSessionIdProvider {
    next: AtomicI32,
}

impl DefaultSessionIdProvider {
    pub fn new() -> Self {
        Self::with_initial_offset(rand::rng().random_range(0..i32::MAX))
    }

    fn with_initial_offset(offset: i32) -> Self {
        Self {
            next: AtomicI32::new(offset),
        }
    }
}

impl Default for DefaultSessionIdProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionIdProvider for DefaultSessionIdProvider {
    fn next_session_id(&self) -> i32 {
        loop {
            let current = self.next.load(Ordering::Relaxed);
            let candidate = if current == i32::MAX { 0 } else { current };
            if self
                .next
                .compare_exchange_weak(
                    current,
                    candidate + 1,
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                )
                .is_ok()
            {
                return candidate + 1;
            }
        }
    }
}
