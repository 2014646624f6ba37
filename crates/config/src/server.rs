//! Collector-discovered server configuration
//!
//! Never loaded from a file: the defaults apply until the first status
//! response arrives, after which the whole record is rebuilt from the
//! response attributes and swapped in atomically (see
//! [`BeaconConfig`](crate::BeaconConfig)).

use vantage_protocol::ResponseAttributes;

const DEFAULT_CAPTURE: bool = true;
const DEFAULT_CAPTURE_ERRORS: bool = true;
const DEFAULT_CAPTURE_CRASHES: bool = true;
const DEFAULT_BEACON_SIZE_BYTES: i32 = 30 * 1024;
const DEFAULT_SEND_INTERVAL_MS: i64 = 120_000;
const DEFAULT_SESSION_DURATION_MS: i64 = -1;
const DEFAULT_SESSION_TIMEOUT_MS: i64 = -1;
const DEFAULT_MAX_EVENTS_PER_SESSION: i32 = -1;
const DEFAULT_MULTIPLICITY: i32 = 1;
const DEFAULT_SERVER_ID: i32 = 1;
const DEFAULT_VISIT_STORE_VERSION: i32 = 1;

/// Settings the collector dictates to the agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    capture: bool,
    capture_errors: bool,
    capture_crashes: bool,
    beacon_size_bytes: i32,
    send_interval_ms: i64,
    session_duration_ms: i64,
    session_timeout_ms: i64,
    max_events_per_session: i32,
    multiplicity: i32,
    server_id: i32,
    visit_store_version: i32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            capture: DEFAULT_CAPTURE,
            capture_errors: DEFAULT_CAPTURE_ERRORS,
            capture_crashes: DEFAULT_CAPTURE_CRASHES,
            beacon_size_bytes: DEFAULT_BEACON_SIZE_BYTES,
            send_interval_ms: DEFAULT_SEND_INTERVAL_MS,
            session_duration_ms: DEFAULT_SESSION_DURATION_MS,
            session_timeout_ms: DEFAULT_SESSION_TIMEOUT_MS,
            max_events_per_session: DEFAULT_MAX_EVENTS_PER_SESSION,
            multiplicity: DEFAULT_MULTIPLICITY,
            server_id: DEFAULT_SERVER_ID,
            visit_store_version: DEFAULT_VISIT_STORE_VERSION,
        }
    }
}

impl ServerConfig {
    /// Build a config from a status response patch; absent attributes keep
    /// their default value.
    pub fn from_attributes(attributes: &ResponseAttributes) -> Self {
        let defaults = Self::default();
        Self {
            capture: attributes.capture.unwrap_or(defaults.capture),
            capture_errors: attributes.capture_errors.unwrap_or(defaults.capture_errors),
            capture_crashes: attributes
                .capture_crashes
                .unwrap_or(defaults.capture_crashes),
            beacon_size_bytes: attributes
                .beacon_size_bytes
                .unwrap_or(defaults.beacon_size_bytes),
            send_interval_ms: attributes
                .send_interval_ms
                .unwrap_or(defaults.send_interval_ms),
            session_duration_ms: attributes
                .session_duration_ms
                .unwrap_or(defaults.session_duration_ms),
            session_timeout_ms: attributes
                .session_timeout_ms
                .unwrap_or(defaults.session_timeout_ms),
            max_events_per_session: attributes
                .max_events_per_session
                .unwrap_or(defaults.max_events_per_session),
            multiplicity: attributes.multiplicity.unwrap_or(defaults.multiplicity),
            server_id: attributes.server_id.unwrap_or(defaults.server_id),
            visit_store_version: attributes
                .visit_store_version
                .unwrap_or(defaults.visit_store_version),
        }
    }

    /// Copy of this config with the capture flag replaced
    #[must_use]
    pub fn with_capture(&self, capture: bool) -> Self {
        Self {
            capture,
            ..self.clone()
        }
    }

    /// Master capture switch as dictated by the collector
    #[inline]
    pub fn capture(&self) -> bool {
        self.capture
    }

    #[inline]
    pub fn beacon_size_bytes(&self) -> i32 {
        self.beacon_size_bytes
    }

    #[inline]
    pub fn send_interval_ms(&self) -> i64 {
        self.send_interval_ms
    }

    #[inline]
    pub fn session_duration_ms(&self) -> i64 {
        self.session_duration_ms
    }

    #[inline]
    pub fn session_timeout_ms(&self) -> i64 {
        self.session_timeout_ms
    }

    #[inline]
    pub fn max_events_per_session(&self) -> i32 {
        self.max_events_per_session
    }

    #[inline]
    pub fn multiplicity(&self) -> i32 {
        self.multiplicity
    }

    #[inline]
    pub fn server_id(&self) -> i32 {
        self.server_id
    }

    #[inline]
    pub fn visit_store_version(&self) -> i32 {
        self.visit_store_version
    }

    /// Whether any data may leave the agent at all
    pub fn is_sending_data_allowed(&self) -> bool {
        self.capture && self.multiplicity > 0
    }

    /// Whether error records may leave the agent
    pub fn is_sending_errors_allowed(&self) -> bool {
        self.is_sending_data_allowed() && self.capture_errors
    }

    /// Whether crash records may leave the agent
    pub fn is_sending_crashes_allowed(&self) -> bool {
        self.is_sending_data_allowed() && self.capture_crashes
    }
}
