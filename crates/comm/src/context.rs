//! Shared state of the sending machinery
//!
//! Everything the sending states need lives here: the discovered server
//! configuration, the session registry, the cache evictor, the shutdown
//! flag and the interruptible sleep the sender thread parks on.
//!
//! The shutdown flag and the session registry are shared with producer
//! threads; the two `last_*` timestamps are only ever written by the
//! sender thread.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, RwLock};

use vantage_cache::{BeaconCache, CacheEvictor};
use vantage_client::Beacon;
use vantage_config::{CacheConfig, ServerConfig};
use vantage_protocol::{HttpClient, HttpClientConfig, HttpClientProvider, StatusResponse};
use vantage_providers::TimingProvider;

use crate::session::SessionWrapper;

/// Shared mutable state driving the sending state machine
pub struct SendingContext {
    http_config: HttpClientConfig,
    http_provider: Arc<dyn HttpClientProvider>,
    timing: Arc<dyn TimingProvider>,
    cache: Arc<BeaconCache>,
    evictor: CacheEvictor,

    server_config: RwLock<Arc<ServerConfig>>,
    server_config_received: AtomicBool,

    sessions: Mutex<Vec<Arc<SessionWrapper>>>,

    shutdown: AtomicBool,
    sleep_lock: Mutex<()>,
    sleep_signal: Condvar,

    last_open_session_send_time: AtomicI64,
    last_status_check_time: AtomicI64,
}

impl SendingContext {
    pub fn new(
        http_config: HttpClientConfig,
        cache: Arc<BeaconCache>,
        cache_config: CacheConfig,
        http_provider: Arc<dyn HttpClientProvider>,
        timing: Arc<dyn TimingProvider>,
    ) -> Self {
        let evictor = CacheEvictor::new(Arc::clone(&cache), cache_config, Arc::clone(&timing));
        Self {
            http_config,
            http_provider,
            timing,
            cache,
            evictor,
            server_config: RwLock::new(Arc::new(ServerConfig::default())),
            server_config_received: AtomicBool::new(false),
            sessions: Mutex::new(Vec::new()),
            shutdown: AtomicBool::new(false),
            sleep_lock: Mutex::new(()),
            sleep_signal: Condvar::new(),
            last_open_session_send_time: AtomicI64::new(0),
            last_status_check_time: AtomicI64::new(0),
        }
    }

    // =========================================================================
    // Shutdown and sleeping
    // =========================================================================

    /// Ask the sender thread to wind down; wakes any pending sleep.
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
        let _guard = self.sleep_lock.lock();
        self.sleep_signal.notify_all();
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Park the sender thread for `duration`, returning early when shutdown
    /// is requested.
    pub fn sleep(&self, duration: Duration) {
        let deadline = Instant::now() + duration;
        let mut guard = self.sleep_lock.lock();
        while !self.is_shutdown_requested() {
            if self.sleep_signal.wait_until(&mut guard, deadline).timed_out() {
                break;
            }
        }
    }

    // =========================================================================
    // Time
    // =========================================================================

    pub fn current_timestamp(&self) -> i64 {
        self.timing.timestamp_ms()
    }

    pub fn last_open_session_send_time(&self) -> i64 {
        self.last_open_session_send_time.load(Ordering::Relaxed)
    }

    pub fn set_last_open_session_send_time(&self, timestamp: i64) {
        self.last_open_session_send_time
            .store(timestamp, Ordering::Relaxed);
    }

    pub fn last_status_check_time(&self) -> i64 {
        self.last_status_check_time.load(Ordering::Relaxed)
    }

    pub fn set_last_status_check_time(&self, timestamp: i64) {
        self.last_status_check_time.store(timestamp, Ordering::Relaxed);
    }

    // =========================================================================
    // Transport and server configuration
    // =========================================================================

    pub fn http_provider(&self) -> &dyn HttpClientProvider {
        self.http_provider.as_ref()
    }

    /// Fresh client for a status request round.
    pub fn create_http_client(&self) -> Box<dyn HttpClient> {
        self.http_provider.create_client(&self.http_config)
    }

    /// Current server configuration as this context sees it
    pub fn server_config(&self) -> Arc<ServerConfig> {
        Arc::clone(&self.server_config.read())
    }

    /// Whether the collector currently allows capturing
    pub fn is_capture_on(&self) -> bool {
        self.server_config().capture()
    }

    /// Apply a successful status response: install the carried server
    /// configuration here and on every registered session.
    pub fn handle_status_response(&self, response: &StatusResponse) {
        if response.is_erroneous() {
            return;
        }
        let server_config = ServerConfig::from_attributes(response.attributes());
        *self.server_config.write() = Arc::new(server_config.clone());
        self.server_config_received.store(true, Ordering::Release);

        for session in self.all_sessions() {
            session.beacon().update_server_config(server_config.clone());
        }
    }

    /// Turn capture off locally and drop whatever the sessions buffered.
    pub fn disable_capture_and_clear_sessions(&self) {
        let disabled = self.server_config().with_capture(false);
        *self.server_config.write() = Arc::new(disabled);

        for session in self.all_sessions() {
            session.beacon().disable_capture();
            session.beacon().clear_data();
            if session.is_finished() {
                self.remove_session(&session);
            }
        }
    }

    // =========================================================================
    // Cache
    // =========================================================================

    pub fn cache(&self) -> &Arc<BeaconCache> {
        &self.cache
    }

    /// One eviction pass; called by the sender thread between ticks.
    pub fn evict_cache(&self) {
        self.evictor.execute();
    }

    // =========================================================================
    // Session registry
    // =========================================================================

    /// Register a session. When a server configuration was already
    /// discovered the new session starts out with it.
    pub fn add_session(&self, beacon: Arc<Beacon>) -> Arc<SessionWrapper> {
        if self.server_config_received.load(Ordering::Acquire) {
            beacon.initialize_server_config((*self.server_config()).clone());
        }
        let wrapper = Arc::new(SessionWrapper::new(beacon));
        self.sessions.lock().push(Arc::clone(&wrapper));
        wrapper
    }

    pub fn remove_session(&self, session: &Arc<SessionWrapper>) {
        self.sessions
            .lock()
            .retain(|candidate| !Arc::ptr_eq(candidate, session));
    }

    pub fn all_sessions(&self) -> Vec<Arc<SessionWrapper>> {
        self.sessions.lock().clone()
    }

    pub fn open_sessions(&self) -> Vec<Arc<SessionWrapper>> {
        self.sessions
            .lock()
            .iter()
            .filter(|session| !session.is_finished())
            .cloned()
            .collect()
    }

    pub fn finished_sessions(&self) -> Vec<Arc<SessionWrapper>> {
        self.sessions
            .lock()
            .iter()
            .filter(|session| session.is_finished())
            .cloned()
            .collect()
    }
}
