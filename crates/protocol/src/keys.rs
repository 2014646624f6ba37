//! Fixed key vocabulary of the beacon wire format
//!
//! Every `key=value` token in a beacon body uses one of these two-character
//! ASCII keys. Grouped the way the collector documents them.

// Basic block
pub const KEY_PROTOCOL_VERSION: &str = "vv";
pub const KEY_AGENT_VERSION: &str = "va";
pub const KEY_APPLICATION_ID: &str = "ap";
pub const KEY_APPLICATION_NAME: &str = "an";
pub const KEY_APPLICATION_VERSION: &str = "vn";
pub const KEY_PLATFORM_TYPE: &str = "pt";
pub const KEY_AGENT_TECHNOLOGY_TYPE: &str = "tt";
pub const KEY_VISITOR_ID: &str = "vi";
pub const KEY_SESSION_NUMBER: &str = "sn";
pub const KEY_SESSION_SEQUENCE: &str = "ss";
pub const KEY_CLIENT_IP_ADDRESS: &str = "ip";
pub const KEY_MULTIPLICITY: &str = "mp";
pub const KEY_DATA_COLLECTION_LEVEL: &str = "dl";
pub const KEY_CRASH_REPORTING_LEVEL: &str = "cl";
pub const KEY_VISIT_STORE_VERSION: &str = "vs";

// Device block
pub const KEY_DEVICE_OS: &str = "os";
pub const KEY_DEVICE_MANUFACTURER: &str = "mf";
pub const KEY_DEVICE_MODEL: &str = "md";

// Timestamp block
pub const KEY_SESSION_START_TIME: &str = "tv";
pub const KEY_TRANSMISSION_TIME: &str = "tx";

// Event block
pub const KEY_EVENT_TYPE: &str = "et";
pub const KEY_NAME: &str = "na";
pub const KEY_THREAD_ID: &str = "it";
pub const KEY_ACTION_ID: &str = "ca";
pub const KEY_PARENT_ACTION_ID: &str = "pa";
pub const KEY_START_SEQUENCE_NUMBER: &str = "s0";
pub const KEY_TIME_0: &str = "t0";
pub const KEY_END_SEQUENCE_NUMBER: &str = "s1";
pub const KEY_TIME_1: &str = "t1";

// Value block
pub const KEY_VALUE: &str = "vl";

// Error and crash block
pub const KEY_ERROR_CODE: &str = "ev";
pub const KEY_ERROR_REASON: &str = "rs";
pub const KEY_ERROR_STACKTRACE: &str = "st";
// Same literal key as the agent technology type; the collector accepts the
// collision because both carry the same value.
pub const KEY_ERROR_TECHNOLOGY_TYPE: &str = "tt";

// Web request block
pub const KEY_WEBREQUEST_RESPONSE_CODE: &str = "rc";
pub const KEY_WEBREQUEST_BYTES_SENT: &str = "bs";
pub const KEY_WEBREQUEST_BYTES_RECEIVED: &str = "br";
