//! Wall-clock time

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock timestamps
pub trait TimingProvider: Send + Sync {
    /// Current wall-clock time in milliseconds since the Unix epoch
    fn timestamp_ms(&self) -> i64;
}

/// System clock
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTimingProvider;

impl TimingProvider for DefaultTimingProvider {
    fn timestamp_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Manually advanced clock for tests
#[derive(Debug, Default)]
pub struct FixedTimingProvider {
    now_ms: AtomicI64,
}

impl FixedTimingProvider {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, delta_ms: i64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }

    /// Pin the clock to an absolute value
    pub fn set(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }
}

impl TimingProvider for FixedTimingProvider {
    fn timestamp_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}
