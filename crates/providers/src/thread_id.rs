//! Per-thread identifiers
//!
//! The wire format correlates events by an `it=` field. Any stable
//! per-thread identifier works; the default hands out process-local
//! monotonic ids on first use per thread.

use std::cell::Cell;
use std::sync::atomic::{AtomicI32, Ordering};

/// Source of a stable identifier for the calling thread
pub trait ThreadIdProvider: Send + Sync {
    /// Identifier of the calling thread; positive and stable for the
    /// thread's lifetime
    fn thread_id(&self) -> i32;
}

static NEXT_THREAD_ID: AtomicI32 = AtomicI32::new(1);

thread_local! {
    static CURRENT_THREAD_ID: Cell<i32> = const { Cell::new(0) };
}

/// Process-local monotonic thread ids
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultThreadIdProvider;

impl ThreadIdProvider for DefaultThreadIdProvider {
    fn thread_id(&self) -> i32 {
        CURRENT_THREAD_ID.with(|slot| {
            let mut id = slot.get();
            if id == 0 {
                id = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
                slot.set(id);
            }
            id
        })
    }
}
