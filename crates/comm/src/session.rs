//! Session bookkeeping for the sender thread

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use vantage_client::Beacon;

/// A session as the sender thread sees it: the beacon plus a finished flag.
///
/// Open sessions are flushed on the open-session interval and ended during
/// the final flush; finished sessions are transmitted once and then leave
/// the registry.
pub struct SessionWrapper {
    beacon: Arc<Beacon>,
    finished: AtomicBool,
}

impl SessionWrapper {
    pub fn new(beacon: Arc<Beacon>) -> Self {
        Self {
            beacon,
            finished: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn beacon(&self) -> &Beacon {
        &self.beacon
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Mark the session finished without touching the beacon; used when the
    /// API layer already recorded the session end.
    pub fn mark_finished(&self) {
        self.finished.store(true, Ordering::Release);
    }

    /// End the session: record the session-end marker and mark finished.
    pub fn end(&self) {
        self.beacon.end_session();
        self.mark_finished();
    }

    /// Whether this session's data may go out: it received a server
    /// configuration and capture is on.
    pub fn is_data_sending_allowed(&self) -> bool {
        self.beacon.is_server_config_set() && self.beacon.is_data_capturing_enabled()
    }
}
