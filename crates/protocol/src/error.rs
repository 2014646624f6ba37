//! Error types for protocol operations

use thiserror::Error;

/// Errors that can occur when talking to the collector
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The HTTP round trip itself failed (connect, send or receive)
    #[error("transport error: {0}")]
    Transport(String),

    /// The collector answered with something that is not a status response
    #[error("malformed collector response: {0}")]
    MalformedResponse(String),
}
