//! Composite configuration owned by each beacon
//!
//! Bundles the boot-time parts (application, privacy, HTTP) with the
//! runtime-mutable server configuration. The server part is an `Arc`
//! swapped whole under a lock, so readers always observe a complete
//! record and never a partial update.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use vantage_protocol::HttpClientConfig;

use crate::{AppConfig, PrivacyConfig, ServerConfig};

/// Observer invoked synchronously whenever the server configuration is
/// replaced via [`BeaconConfig::update_server_config`].
pub type ServerConfigUpdateCallback = Box<dyn Fn(&ServerConfig) + Send + Sync>;

/// Configuration composite consumed by the beacon assembler
pub struct BeaconConfig {
    app: AppConfig,
    privacy: PrivacyConfig,
    http: HttpClientConfig,
    server: RwLock<Arc<ServerConfig>>,
    server_config_set: AtomicBool,
    update_callback: Mutex<Option<ServerConfigUpdateCallback>>,
}

impl BeaconConfig {
    pub fn new(app: AppConfig, privacy: PrivacyConfig, http: HttpClientConfig) -> Self {
        Self {
            app,
            privacy,
            http,
            server: RwLock::new(Arc::new(ServerConfig::default())),
            server_config_set: AtomicBool::new(false),
            update_callback: Mutex::new(None),
        }
    }

    #[inline]
    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    #[inline]
    pub fn privacy(&self) -> &PrivacyConfig {
        &self.privacy
    }

    #[inline]
    pub fn http_config(&self) -> &HttpClientConfig {
        &self.http
    }

    /// Snapshot of the current server configuration.
    ///
    /// Until the collector supplied one this returns the built-in defaults.
    pub fn server_config(&self) -> Arc<ServerConfig> {
        Arc::clone(&self.server.read())
    }

    /// Whether a server configuration was installed (or capture was toggled
    /// explicitly) since boot.
    pub fn is_server_config_set(&self) -> bool {
        self.server_config_set.load(Ordering::Acquire)
    }

    /// Install a server configuration without notifying the observer.
    ///
    /// Used for sessions created before the first status response arrived.
    pub fn initialize_server_config(&self, config: ServerConfig) {
        self.swap_server_config(config);
    }

    /// Replace the server configuration and notify the observer.
    pub fn update_server_config(&self, config: ServerConfig) {
        let installed = self.swap_server_config(config);
        if let Some(callback) = self.update_callback.lock().as_ref() {
            callback(&installed);
        }
    }

    /// Force the capture flag on, keeping all other server settings.
    ///
    /// Marks the configuration as set, like a real server response would.
    pub fn enable_capture(&self) {
        let current = self.server_config();
        self.swap_server_config(current.with_capture(true));
    }

    /// Force the capture flag off, keeping all other server settings.
    pub fn disable_capture(&self) {
        let current = self.server_config();
        self.swap_server_config(current.with_capture(false));
    }

    /// Register (or clear) the single observer slot.
    pub fn set_server_config_update_callback(&self, callback: Option<ServerConfigUpdateCallback>) {
        *self.update_callback.lock() = callback;
    }

    fn swap_server_config(&self, config: ServerConfig) -> Arc<ServerConfig> {
        let installed = Arc::new(config);
        *self.server.write() = Arc::clone(&installed);
        self.server_config_set.store(true, Ordering::Release);
        installed
    }
}

impl std::fmt::Debug for BeaconConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeaconConfig")
            .field("app", &self.app)
            .field("privacy", &self.privacy)
            .field("server", &self.server.read())
            .field("server_config_set", &self.is_server_config_set())
            .finish_non_exhaustive()
    }
}
