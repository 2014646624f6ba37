//! Vantage Client - Beacon assembly
//!
//! A [`Beacon`] turns typed telemetry events into their wire-format
//! fragments, applies the privacy and server-side capture gates, buffers
//! the fragments in the shared beacon cache and drains them to the
//! collector in size-limited chunks.
//!
//! One beacon exists per session; its identity, immutable protocol prefix
//! and visitor id are fixed at construction.

mod beacon;
mod types;

pub use beacon::{Beacon, BeaconInit};
pub use types::{ActionData, WebRequestData};

/// Headroom subtracted from the server-configured beacon size before
/// chunking, tolerating header growth between chunks of one send pass.
pub const CHUNK_RESERVE_BYTES: usize = 1024;

/// Names and string values longer than this are truncated before encoding
pub const MAX_NAME_LEN: usize = 250;

// Test modules - only compiled during testing
#[cfg(test)]
mod beacon_test;
