//! The beacon assembler
//!
//! Holds one session's protocol state and turns API-level events into
//! cached wire fragments. Every reporting operation checks its privacy
//! gate and the server-side capture gate first and silently does nothing
//! when either denies; callers never observe an error from reporting.

use std::fmt::Write as _;
use std::net::IpAddr;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use tracing::warn;

use vantage_cache::{BeaconCache, BeaconKey};
use vantage_config::{BeaconConfig, ServerConfig, ServerConfigUpdateCallback};
use vantage_protocol::{
    keys, percent_encode, AdditionalQueryParams, EventType, HttpClientProvider, StatusResponse,
    AGENT_TECHNOLOGY_TYPE, AGENT_VERSION, BEACON_DATA_DELIMITER, ERROR_TECHNOLOGY_TYPE,
    PLATFORM_TYPE, PROTOCOL_VERSION,
};
use vantage_providers::{
    RandomNumberGenerator, SessionIdProvider, ThreadIdProvider, TimingProvider,
};

use crate::types::{ActionData, WebRequestData};
use crate::{CHUNK_RESERVE_BYTES, MAX_NAME_LEN};

/// Prefix of every web-request tag
const TAG_PREFIX: &str = "MT";

/// Characters escaped on top of the RFC 3986 reserved set; keeps user data
/// from colliding with the underscore-separated tag fields
const RESERVED_CHARACTERS: &[char] = &['_'];

/// Collaborators handed to a new beacon
pub struct BeaconInit {
    /// Shared fragment cache
    pub cache: Arc<BeaconCache>,
    /// Counter for the session number
    pub session_ids: Arc<dyn SessionIdProvider>,
    /// Sequence number of the session split this beacon belongs to
    pub session_sequence_number: i32,
    /// Wall clock
    pub timing: Arc<dyn TimingProvider>,
    /// Per-thread identifiers
    pub thread_ids: Arc<dyn ThreadIdProvider>,
    /// Randomness for anonymous visitor ids
    pub random: Arc<dyn RandomNumberGenerator>,
    /// Client IP literal, if the host knows it
    pub client_ip: Option<String>,
}

/// One session's worth of buffered telemetry plus its protocol envelope
pub struct Beacon {
    key: BeaconKey,
    session_start_time: i64,
    device_id: i64,
    client_ip: String,
    immutable_basic_data: String,
    next_id: AtomicI32,
    next_sequence_number: AtomicI32,
    config: Arc<BeaconConfig>,
    cache: Arc<BeaconCache>,
    timing: Arc<dyn TimingProvider>,
    thread_ids: Arc<dyn ThreadIdProvider>,
}

impl Beacon {
    /// Create a beacon for a new session.
    ///
    /// Draws the session number, fixes the session start time and builds
    /// the immutable part of the protocol envelope.
    pub fn new(init: BeaconInit, config: Arc<BeaconConfig>) -> Self {
        let session_number = init.session_ids.next_session_id();
        let key = BeaconKey::new(session_number, init.session_sequence_number);
        let session_start_time = init.timing.timestamp_ms();
        let device_id = create_device_id(init.random.as_ref(), &config);

        let client_ip = match init.client_ip {
            // a missing client IP is fine, the collector uses the peer address
            None => String::new(),
            Some(ip) if ip.parse::<IpAddr>().is_ok() => ip,
            Some(ip) => {
                warn!(ip = %ip, "client IP address validation failed");
                String::new()
            }
        };

        let immutable_basic_data =
            build_immutable_basic_data(&config, device_id, &client_ip, key);

        Self {
            key,
            session_start_time,
            device_id,
            client_ip,
            immutable_basic_data,
            next_id: AtomicI32::new(0),
            next_sequence_number: AtomicI32::new(0),
            config,
            cache: init.cache,
            timing: init.timing,
            thread_ids: init.thread_ids,
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Cache identity of this beacon
    #[inline]
    pub fn key(&self) -> BeaconKey {
        self.key
    }

    /// Visitor id sent on the wire: the configured device id when privacy
    /// allows it, otherwise a random value drawn at construction
    #[inline]
    pub fn device_id(&self) -> i64 {
        self.device_id
    }

    /// Session number sent on the wire; the literal `1` when privacy
    /// forbids reporting the real one
    pub fn session_number(&self) -> i32 {
        if self.config.privacy().is_session_number_reporting_allowed() {
            self.key.session_number
        } else {
            1
        }
    }

    /// Sequence number of the session split this beacon belongs to
    #[inline]
    pub fn session_sequence_number(&self) -> i32 {
        self.key.session_sequence
    }

    /// Wall-clock time this beacon (and its session) started
    #[inline]
    pub fn session_start_time(&self) -> i64 {
        self.session_start_time
    }

    /// Current wall-clock time in milliseconds
    pub fn current_timestamp(&self) -> i64 {
        self.timing.timestamp_ms()
    }

    /// Next identifier, unique within this beacon; starts at 1
    pub fn create_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Next sequence number, unique within this beacon; starts at 1
    pub fn create_sequence_number(&self) -> i32 {
        self.next_sequence_number.fetch_add(1, Ordering::Relaxed) + 1
    }

    // =========================================================================
    // Reporting operations
    // =========================================================================

    /// Record the session-start marker.
    pub fn start_session(&self) {
        if !self.is_data_capturing_enabled() {
            return;
        }

        let mut event = String::new();
        self.build_basic_event_data(&mut event, EventType::SessionStart, None);
        add_kv_i32(&mut event, keys::KEY_PARENT_ACTION_ID, 0);
        add_kv_i32(
            &mut event,
            keys::KEY_START_SEQUENCE_NUMBER,
            self.create_sequence_number(),
        );
        add_kv_i64(&mut event, keys::KEY_TIME_0, 0);

        self.add_event_data(self.session_start_time, &event);
    }

    /// Record the session-end marker.
    pub fn end_session(&self) {
        if !self.config.privacy().is_session_reporting_allowed() {
            return;
        }
        if !self.is_data_capturing_enabled() {
            return;
        }

        let mut event = String::new();
        self.build_basic_event_data(&mut event, EventType::SessionEnd, None);

        let session_end_time = self.current_timestamp();
        add_kv_i32(&mut event, keys::KEY_PARENT_ACTION_ID, 0);
        add_kv_i32(
            &mut event,
            keys::KEY_START_SEQUENCE_NUMBER,
            self.create_sequence_number(),
        );
        add_kv_i64(
            &mut event,
            keys::KEY_TIME_0,
            self.time_since_session_start(session_end_time),
        );

        self.add_event_data(session_end_time, &event);
    }

    /// Record a finished action.
    pub fn add_action(&self, action: &ActionData) {
        if !self.config.privacy().is_action_reporting_allowed() {
            return;
        }
        if !self.is_data_capturing_enabled() {
            return;
        }

        let mut record = String::new();
        self.build_basic_event_data(&mut record, EventType::Action, Some(&action.name));
        add_kv_i32(&mut record, keys::KEY_ACTION_ID, action.id);
        add_kv_i32(&mut record, keys::KEY_PARENT_ACTION_ID, action.parent_id);
        add_kv_i32(
            &mut record,
            keys::KEY_START_SEQUENCE_NUMBER,
            action.start_sequence_no,
        );
        add_kv_i64(
            &mut record,
            keys::KEY_TIME_0,
            self.time_since_session_start(action.start_time),
        );
        add_kv_i32(
            &mut record,
            keys::KEY_END_SEQUENCE_NUMBER,
            action.end_sequence_no,
        );
        add_kv_i64(
            &mut record,
            keys::KEY_TIME_1,
            action.end_time - action.start_time,
        );

        self.add_action_data(action.start_time, &record);
    }

    /// Record a 32-bit integer value on an action.
    pub fn report_int_value(&self, parent_action_id: i32, value_name: &str, value: i32) {
        if !self.config.privacy().is_value_reporting_allowed() {
            return;
        }
        if !self.is_data_capturing_enabled() {
            return;
        }

        let mut event = String::new();
        let timestamp =
            self.build_event(&mut event, EventType::ValueInt, Some(value_name), parent_action_id);
        add_kv_i32(&mut event, keys::KEY_VALUE, value);

        self.add_event_data(timestamp, &event);
    }

    /// Record a double value on an action.
    pub fn report_double_value(&self, parent_action_id: i32, value_name: &str, value: f64) {
        if !self.config.privacy().is_value_reporting_allowed() {
            return;
        }
        if !self.is_data_capturing_enabled() {
            return;
        }

        let mut event = String::new();
        let timestamp = self.build_event(
            &mut event,
            EventType::ValueDouble,
            Some(value_name),
            parent_action_id,
        );
        add_kv_f64(&mut event, keys::KEY_VALUE, value);

        self.add_event_data(timestamp, &event);
    }

    /// Record a string value on an action; a `None` value yields a record
    /// without a `vl=` field.
    pub fn report_string_value(&self, parent_action_id: i32, value_name: &str, value: Option<&str>) {
        if !self.config.privacy().is_value_reporting_allowed() {
            return;
        }
        if !self.is_data_capturing_enabled() {
            return;
        }

        let mut event = String::new();
        let timestamp = self.build_event(
            &mut event,
            EventType::ValueString,
            Some(value_name),
            parent_action_id,
        );
        if let Some(value) = value {
            add_kv_string(&mut event, keys::KEY_VALUE, truncate(value));
        }

        self.add_event_data(timestamp, &event);
    }

    /// Record a named event on an action.
    pub fn report_event(&self, parent_action_id: i32, event_name: &str) {
        if !self.config.privacy().is_event_reporting_allowed() {
            return;
        }
        if !self.is_data_capturing_enabled() {
            return;
        }

        let mut event = String::new();
        let timestamp = self.build_event(
            &mut event,
            EventType::NamedEvent,
            Some(event_name),
            parent_action_id,
        );

        self.add_event_data(timestamp, &event);
    }

    /// Record an error on an action.
    pub fn report_error(
        &self,
        parent_action_id: i32,
        error_name: &str,
        error_code: i32,
        reason: Option<&str>,
    ) {
        if !self.config.privacy().is_error_reporting_allowed() {
            return;
        }
        if !self.config.server_config().is_sending_errors_allowed() {
            return;
        }

        let mut event = String::new();
        self.build_basic_event_data(&mut event, EventType::Error, Some(error_name));

        let timestamp = self.current_timestamp();
        add_kv_i32(&mut event, keys::KEY_PARENT_ACTION_ID, parent_action_id);
        add_kv_i32(
            &mut event,
            keys::KEY_START_SEQUENCE_NUMBER,
            self.create_sequence_number(),
        );
        add_kv_i64(
            &mut event,
            keys::KEY_TIME_0,
            self.time_since_session_start(timestamp),
        );
        add_kv_i32(&mut event, keys::KEY_ERROR_CODE, error_code);
        add_kv_string_opt(&mut event, keys::KEY_ERROR_REASON, reason);
        add_kv_string(
            &mut event,
            keys::KEY_ERROR_TECHNOLOGY_TYPE,
            ERROR_TECHNOLOGY_TYPE,
        );

        self.add_event_data(timestamp, &event);
    }

    /// Record a crash; crashes have no parent action.
    pub fn report_crash(&self, error_name: &str, reason: Option<&str>, stacktrace: Option<&str>) {
        if !self.config.privacy().is_crash_reporting_allowed() {
            return;
        }
        if !self.config.server_config().is_sending_crashes_allowed() {
            return;
        }

        let mut event = String::new();
        self.build_basic_event_data(&mut event, EventType::Crash, Some(error_name));

        let timestamp = self.current_timestamp();
        add_kv_i32(&mut event, keys::KEY_PARENT_ACTION_ID, 0);
        add_kv_i32(
            &mut event,
            keys::KEY_START_SEQUENCE_NUMBER,
            self.create_sequence_number(),
        );
        add_kv_i64(
            &mut event,
            keys::KEY_TIME_0,
            self.time_since_session_start(timestamp),
        );
        add_kv_string_opt(&mut event, keys::KEY_ERROR_REASON, reason);
        add_kv_string_opt(&mut event, keys::KEY_ERROR_STACKTRACE, stacktrace);
        add_kv_string(
            &mut event,
            keys::KEY_ERROR_TECHNOLOGY_TYPE,
            ERROR_TECHNOLOGY_TYPE,
        );

        self.add_event_data(timestamp, &event);
    }

    /// Record a finished web-request trace.
    pub fn add_web_request(&self, parent_action_id: i32, web_request: &WebRequestData) {
        if !self.config.privacy().is_web_request_tracing_allowed() {
            return;
        }
        if !self.is_data_capturing_enabled() {
            return;
        }

        let mut event = String::new();
        self.build_basic_event_data(&mut event, EventType::WebRequest, Some(&web_request.url));
        add_kv_i32(&mut event, keys::KEY_PARENT_ACTION_ID, parent_action_id);
        add_kv_i32(
            &mut event,
            keys::KEY_START_SEQUENCE_NUMBER,
            web_request.start_sequence_no,
        );
        add_kv_i64(
            &mut event,
            keys::KEY_TIME_0,
            self.time_since_session_start(web_request.start_time),
        );
        add_kv_i32(
            &mut event,
            keys::KEY_END_SEQUENCE_NUMBER,
            web_request.end_sequence_no,
        );
        add_kv_i64(
            &mut event,
            keys::KEY_TIME_1,
            web_request.end_time - web_request.start_time,
        );
        add_kv_i64_if_not_negative(
            &mut event,
            keys::KEY_WEBREQUEST_BYTES_SENT,
            web_request.bytes_sent,
        );
        add_kv_i64_if_not_negative(
            &mut event,
            keys::KEY_WEBREQUEST_BYTES_RECEIVED,
            web_request.bytes_received,
        );
        add_kv_i32_if_not_negative(
            &mut event,
            keys::KEY_WEBREQUEST_RESPONSE_CODE,
            web_request.response_code,
        );

        self.add_event_data(web_request.start_time, &event);
    }

    /// Record a user identification; a `None` tag anonymises the user again.
    pub fn identify_user(&self, user_tag: Option<&str>) {
        if !self.config.privacy().is_user_identification_allowed() {
            return;
        }
        if !self.is_data_capturing_enabled() {
            return;
        }

        let mut event = String::new();
        self.build_basic_event_data(&mut event, EventType::IdentifyUser, user_tag);

        let timestamp = self.current_timestamp();
        add_kv_i32(&mut event, keys::KEY_PARENT_ACTION_ID, 0);
        add_kv_i32(
            &mut event,
            keys::KEY_START_SEQUENCE_NUMBER,
            self.create_sequence_number(),
        );
        add_kv_i64(
            &mut event,
            keys::KEY_TIME_0,
            self.time_since_session_start(timestamp),
        );

        self.add_event_data(timestamp, &event);
    }

    /// Build the tag attached to an outgoing web request as an HTTP header.
    ///
    /// Returns an empty string when web-request tracing is not allowed.
    pub fn create_tag(&self, parent_action_id: i32, tracer_seq_no: i32) -> String {
        if !self.config.privacy().is_web_request_tracing_allowed() {
            return String::new();
        }

        let server_id = self.config.http_config().server_id;
        let mut tag = String::from(TAG_PREFIX);
        let _ = write!(tag, "_{PROTOCOL_VERSION}");
        let _ = write!(tag, "_{server_id}");
        let _ = write!(tag, "_{}", self.device_id);
        let _ = write!(tag, "_{}", self.session_number());
        if self.visit_store_version() > 1 {
            let _ = write!(tag, "-{}", self.session_sequence_number());
        }
        let _ = write!(tag, "_{}", self.config.app().percent_encoded_application_id());
        let _ = write!(tag, "_{parent_action_id}");
        let _ = write!(tag, "_{}", self.thread_ids.thread_id());
        let _ = write!(tag, "_{tracer_seq_no}");
        tag
    }

    // =========================================================================
    // Sending
    // =========================================================================

    /// Drain and transmit everything cached for this beacon.
    ///
    /// Chunks are capped at the server-configured beacon size minus
    /// [`CHUNK_RESERVE_BYTES`]. A confirmed chunk is removed for good; on a
    /// missing or erroneous response the in-flight chunk is rolled back and
    /// the pass ends, leaving the retry to the next pass.
    ///
    /// Returns the last response received from the collector, if any.
    pub fn send(
        &self,
        provider: &dyn HttpClientProvider,
        params: Option<&AdditionalQueryParams>,
    ) -> Option<StatusResponse> {
        let client = provider.create_client(self.config.http_config());
        let mut response = None;

        loop {
            // rebuilt per chunk, the transmission timestamp moves
            let prefix = self.build_mutable_beacon_data();
            let max_size = (self.config.server_config().beacon_size_bytes().max(0) as usize)
                .saturating_sub(CHUNK_RESERVE_BYTES);

            let Some(chunk) =
                self.cache
                    .get_next_beacon_chunk(self.key, &prefix, max_size, BEACON_DATA_DELIMITER)
            else {
                break;
            };
            if chunk.is_empty() {
                break;
            }

            match client.send_beacon_request(&self.client_ip, chunk.as_bytes(), params) {
                Ok(status) => {
                    let erroneous = status.is_erroneous();
                    response = Some(status);
                    if erroneous {
                        self.cache.reset_chunked_data(self.key);
                        break;
                    }
                    self.cache.remove_chunked_data(self.key);
                }
                Err(error) => {
                    warn!(key = %self.key, error = %error, "beacon send failed, data kept for retry");
                    response = None;
                    self.cache.reset_chunked_data(self.key);
                    break;
                }
            }
        }

        response
    }

    /// Drop everything cached for this beacon.
    pub fn clear_data(&self) {
        self.cache.delete_cache_entry(self.key);
    }

    /// True when nothing is cached for this beacon.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty(self.key)
    }

    // =========================================================================
    // Configuration passthrough
    // =========================================================================

    /// Whether the server currently allows this beacon to capture at all
    pub fn is_data_capturing_enabled(&self) -> bool {
        self.config.server_config().is_sending_data_allowed()
    }

    /// Whether action reporting is allowed by the privacy settings
    pub fn is_action_reporting_allowed_by_privacy(&self) -> bool {
        self.config.privacy().is_action_reporting_allowed()
    }

    /// Install a server configuration without notifying the update observer
    pub fn initialize_server_config(&self, server_config: ServerConfig) {
        self.config.initialize_server_config(server_config);
    }

    /// Replace the server configuration and notify the update observer
    pub fn update_server_config(&self, server_config: ServerConfig) {
        self.config.update_server_config(server_config);
    }

    /// Whether a server configuration was installed since boot
    pub fn is_server_config_set(&self) -> bool {
        self.config.is_server_config_set()
    }

    /// Register the single observer notified on server-config updates
    pub fn set_server_config_update_callback(&self, callback: Option<ServerConfigUpdateCallback>) {
        self.config.set_server_config_update_callback(callback);
    }

    /// Force capture on, e.g. for the final flush at shutdown
    pub fn enable_capture(&self) {
        self.config.enable_capture();
    }

    /// Force capture off
    pub fn disable_capture(&self) {
        self.config.disable_capture();
    }

    // =========================================================================
    // Serialisation internals
    // =========================================================================

    fn build_basic_event_data(&self, out: &mut String, event_type: EventType, name: Option<&str>) {
        add_kv_i32(out, keys::KEY_EVENT_TYPE, event_type.protocol_value());
        if let Some(name) = name {
            add_kv_string(out, keys::KEY_NAME, truncate(name));
        }
        add_kv_i32(out, keys::KEY_THREAD_ID, self.thread_ids.thread_id());
    }

    /// Shared header of all single-moment events; returns the event's
    /// wall-clock timestamp.
    fn build_event(
        &self,
        out: &mut String,
        event_type: EventType,
        name: Option<&str>,
        parent_action_id: i32,
    ) -> i64 {
        self.build_basic_event_data(out, event_type, name);

        let timestamp = self.current_timestamp();
        add_kv_i32(out, keys::KEY_PARENT_ACTION_ID, parent_action_id);
        add_kv_i32(
            out,
            keys::KEY_START_SEQUENCE_NUMBER,
            self.create_sequence_number(),
        );
        add_kv_i64(out, keys::KEY_TIME_0, self.time_since_session_start(timestamp));
        timestamp
    }

    /// Immutable prefix extended by the per-send fields: visit store
    /// version (plus session sequence on version 2+), transmission and
    /// session-start timestamps, multiplicity.
    fn build_mutable_beacon_data(&self) -> String {
        let server = self.config.server_config();
        let mut out = String::with_capacity(self.immutable_basic_data.len() + 64);
        out.push_str(&self.immutable_basic_data);

        add_kv_i32(&mut out, keys::KEY_VISIT_STORE_VERSION, server.visit_store_version());
        if server.visit_store_version() > 1 {
            add_kv_i32(&mut out, keys::KEY_SESSION_SEQUENCE, self.session_sequence_number());
        }

        add_kv_i64(&mut out, keys::KEY_TRANSMISSION_TIME, self.current_timestamp());
        add_kv_i64(&mut out, keys::KEY_SESSION_START_TIME, self.session_start_time);

        add_kv_i32(&mut out, keys::KEY_MULTIPLICITY, server.multiplicity());

        out
    }

    fn visit_store_version(&self) -> i32 {
        self.config.server_config().visit_store_version()
    }

    fn time_since_session_start(&self, timestamp: i64) -> i64 {
        timestamp - self.session_start_time
    }

    fn add_event_data(&self, timestamp: i64, data: &str) {
        if self.is_data_capturing_enabled() {
            self.cache.add_event_data(self.key, timestamp, data);
        }
    }

    fn add_action_data(&self, timestamp: i64, data: &str) {
        if self.is_data_capturing_enabled() {
            self.cache.add_action_data(self.key, timestamp, data);
        }
    }
}

fn create_device_id(random: &dyn RandomNumberGenerator, config: &BeaconConfig) -> i64 {
    if config.privacy().is_device_id_sending_allowed() {
        return config.app().device_id();
    }
    // user denied tracking, use a fresh anonymous id per beacon
    random.next_positive_i64()
}

fn build_immutable_basic_data(
    config: &BeaconConfig,
    device_id: i64,
    client_ip: &str,
    key: BeaconKey,
) -> String {
    let app = config.app();
    let privacy = config.privacy();
    let session_number = if privacy.is_session_number_reporting_allowed() {
        key.session_number
    } else {
        1
    };

    let mut out = String::with_capacity(256);

    // version and application block
    add_kv_i32(&mut out, keys::KEY_PROTOCOL_VERSION, PROTOCOL_VERSION);
    add_kv_string(&mut out, keys::KEY_AGENT_VERSION, AGENT_VERSION);
    add_kv_string(&mut out, keys::KEY_APPLICATION_ID, app.application_id());
    add_kv_string_opt(&mut out, keys::KEY_APPLICATION_NAME, app.application_name());
    add_kv_string_opt(&mut out, keys::KEY_APPLICATION_VERSION, app.application_version());
    add_kv_i32(&mut out, keys::KEY_PLATFORM_TYPE, PLATFORM_TYPE);
    add_kv_string(&mut out, keys::KEY_AGENT_TECHNOLOGY_TYPE, AGENT_TECHNOLOGY_TYPE);

    // visitor, session and origin block
    add_kv_i64(&mut out, keys::KEY_VISITOR_ID, device_id);
    add_kv_i32(&mut out, keys::KEY_SESSION_NUMBER, session_number);
    add_kv_string(&mut out, keys::KEY_CLIENT_IP_ADDRESS, client_ip);

    // device block
    add_kv_string_opt(&mut out, keys::KEY_DEVICE_OS, app.operating_system());
    add_kv_string_opt(&mut out, keys::KEY_DEVICE_MANUFACTURER, app.manufacturer());
    add_kv_string_opt(&mut out, keys::KEY_DEVICE_MODEL, app.model_id());

    // privacy block
    add_kv_i32(
        &mut out,
        keys::KEY_DATA_COLLECTION_LEVEL,
        privacy.data_collection_level.protocol_value(),
    );
    add_kv_i32(
        &mut out,
        keys::KEY_CRASH_REPORTING_LEVEL,
        privacy.crash_reporting_level.protocol_value(),
    );

    out
}

fn append_key(out: &mut String, key: &str) {
    if !out.is_empty() {
        out.push(BEACON_DATA_DELIMITER);
    }
    out.push_str(key);
    out.push('=');
}

fn add_kv_string(out: &mut String, key: &str, value: &str) {
    append_key(out, key);
    out.push_str(&percent_encode(value, RESERVED_CHARACTERS));
}

fn add_kv_string_opt(out: &mut String, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        add_kv_string(out, key, value);
    }
}

fn add_kv_i32(out: &mut String, key: &str, value: i32) {
    append_key(out, key);
    let _ = write!(out, "{value}");
}

fn add_kv_i64(out: &mut String, key: &str, value: i64) {
    append_key(out, key);
    let _ = write!(out, "{value}");
}

fn add_kv_f64(out: &mut String, key: &str, value: f64) {
    append_key(out, key);
    let _ = write!(out, "{value}");
}

fn add_kv_i32_if_not_negative(out: &mut String, key: &str, value: i32) {
    if value >= 0 {
        add_kv_i32(out, key, value);
    }
}

fn add_kv_i64_if_not_negative(out: &mut String, key: &str, value: i64) {
    if value >= 0 {
        add_kv_i64(out, key, value);
    }
}

/// Trim surrounding whitespace, then cap at [`MAX_NAME_LEN`] characters.
fn truncate(name: &str) -> &str {
    let trimmed = name.trim();
    match trimmed.char_indices().nth(MAX_NAME_LEN) {
        Some((index, _)) => &trimmed[..index],
        None => trimmed,
    }
}
