//! Vantage Protocol - Wire format types for the Vantage monitoring agent
//!
//! This crate provides everything the agent needs to speak the collector's
//! beacon protocol:
//!
//! - [`keys`] - The fixed two-character key vocabulary
//! - [`encoder`] - UTF-8 percent encoding with an extended reserved set
//! - [`EventType`] - Protocol codes for the event records a beacon carries
//! - [`StatusResponse`] / [`ResponseAttributes`] - Parsed collector replies
//! - [`HttpClient`] / [`HttpClientProvider`] - Transport contracts
//!
//! # Wire Format
//!
//! A beacon request body is a UTF-8 string of `key=value` pairs joined by
//! `&`. Keys come from the fixed vocabulary in [`keys`]; string values are
//! percent encoded so that neither `&` nor `=` can appear raw.

mod encoder;
mod error;
mod event;
mod http;
mod response;

pub mod keys;
pub mod test;

pub use encoder::percent_encode;
pub use error::ProtocolError;
pub use event::EventType;
pub use http::{AdditionalQueryParams, HttpClient, HttpClientConfig, HttpClientProvider};
pub use response::{ResponseAttributes, StatusResponse};

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Version of the beacon protocol this agent speaks
pub const PROTOCOL_VERSION: i32 = 3;

/// Agent version reported to the collector
pub const AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Platform type identifier reported to the collector
pub const PLATFORM_TYPE: i32 = 1;

/// Agent technology type reported in the basic beacon block
pub const AGENT_TECHNOLOGY_TYPE: &str = "vantage";

/// Technology type attached to error and crash records
///
/// Deliberately the same literal as [`AGENT_TECHNOLOGY_TYPE`]; the collector
/// does not distinguish the two.
pub const ERROR_TECHNOLOGY_TYPE: &str = "vantage";

/// Delimiter between `key=value` pairs in a beacon body
pub const BEACON_DATA_DELIMITER: char = '&';

/// First HTTP status code treated as an erroneous response
pub const HTTP_BAD_REQUEST: u16 = 400;
