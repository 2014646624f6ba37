//! Collector status responses
//!
//! Both request kinds (`status` and `beacon`) answer with a status response:
//! an HTTP status code plus an optional patch of server-side settings the
//! agent is expected to apply.

use crate::HTTP_BAD_REQUEST;

/// Server-side settings carried by a status response.
///
/// Every field is optional; absent fields leave the agent's current server
/// configuration untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseAttributes {
    /// Master capture switch
    pub capture: Option<bool>,

    /// Whether error records may be sent
    pub capture_errors: Option<bool>,

    /// Whether crash records may be sent
    pub capture_crashes: Option<bool>,

    /// Upper bound for one beacon chunk in bytes
    pub beacon_size_bytes: Option<i32>,

    /// Interval between open-session flushes in milliseconds
    pub send_interval_ms: Option<i64>,

    /// Maximum session duration in milliseconds before a forced split
    pub session_duration_ms: Option<i64>,

    /// Idle timeout after which a session is considered ended
    pub session_timeout_ms: Option<i64>,

    /// Maximum number of top-level events per session
    pub max_events_per_session: Option<i32>,

    /// Sampling multiplicity; `0` disables sending entirely
    pub multiplicity: Option<i32>,

    /// Identifier of the collector node handling this agent
    pub server_id: Option<i32>,

    /// Visit-store protocol revision
    pub visit_store_version: Option<i32>,
}

/// Reply from the collector to a status or beacon request
#[derive(Debug, Clone)]
pub struct StatusResponse {
    status_code: u16,
    attributes: ResponseAttributes,
}

impl StatusResponse {
    /// Create a response from a status code and parsed attributes
    pub fn new(status_code: u16, attributes: ResponseAttributes) -> Self {
        Self {
            status_code,
            attributes,
        }
    }

    /// Create a response carrying no configuration patch
    pub fn with_status(status_code: u16) -> Self {
        Self::new(status_code, ResponseAttributes::default())
    }

    /// HTTP status code of the reply
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Server settings patch carried by the reply
    #[inline]
    pub fn attributes(&self) -> &ResponseAttributes {
        &self.attributes
    }

    /// A response is erroneous when the collector answered with a client or
    /// server error status.
    #[inline]
    pub fn is_erroneous(&self) -> bool {
        self.status_code >= HTTP_BAD_REQUEST
    }
}
