//! HTTP transport contracts
//!
//! The agent core never performs network I/O itself. It drives an abstract
//! [`HttpClient`] created through an [`HttpClientProvider`]; the host binary
//! supplies the real implementation.

use std::time::Duration;

use crate::{Result, StatusResponse};

/// Default connect timeout for collector requests
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default read timeout for collector requests
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection parameters for talking to one collector node
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL of the collector endpoint
    pub base_url: String,

    /// Identifier of the collector node this agent is pinned to
    pub server_id: i32,

    /// Application identifier, sent verbatim as a query parameter
    pub application_id: String,

    /// Connect timeout
    pub connect_timeout: Duration,

    /// Read timeout
    pub read_timeout: Duration,
}

impl HttpClientConfig {
    /// Create a config with default timeouts
    pub fn new(base_url: impl Into<String>, server_id: i32, application_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            server_id,
            application_id: application_id.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

/// Extra query parameters appended to every collector request
#[derive(Debug, Clone, Copy, Default)]
pub struct AdditionalQueryParams {
    /// Timestamp of the server configuration the agent currently holds,
    /// milliseconds since epoch. Lets the collector skip unchanged patches.
    pub config_timestamp: i64,
}

/// One HTTP conversation with the collector.
///
/// Implementations block the calling thread; only the dedicated sender
/// thread ever invokes these methods.
pub trait HttpClient: Send {
    /// Ask the collector for the current server configuration.
    fn send_status_request(
        &self,
        params: Option<&AdditionalQueryParams>,
    ) -> Result<StatusResponse>;

    /// Deliver one beacon chunk.
    ///
    /// `client_ip` is forwarded so the collector can attribute the data when
    /// the agent runs behind a proxy; an empty string means "use the peer
    /// address of the connection".
    fn send_beacon_request(
        &self,
        client_ip: &str,
        body: &[u8],
        params: Option<&AdditionalQueryParams>,
    ) -> Result<StatusResponse>;
}

/// Factory for [`HttpClient`] instances.
///
/// A fresh client is created per send pass so that server-id reassignments
/// picked up from status responses take effect on the next pass.
pub trait HttpClientProvider: Send + Sync {
    /// Create a client for the given connection parameters.
    fn create_client(&self, config: &HttpClientConfig) -> Box<dyn HttpClient>;
}
