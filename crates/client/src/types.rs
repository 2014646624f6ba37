//! Data carried by the API layer into the assembler

/// A finished user action to serialise
#[derive(Debug, Clone)]
pub struct ActionData {
    /// Identifier created via [`Beacon::create_id`](crate::Beacon::create_id)
    pub id: i32,
    /// Identifier of the enclosing action, `0` for top level
    pub parent_id: i32,
    /// Action name as reported by the user
    pub name: String,
    /// Wall-clock start time in milliseconds
    pub start_time: i64,
    /// Wall-clock end time in milliseconds
    pub end_time: i64,
    /// Sequence number drawn when the action started
    pub start_sequence_no: i32,
    /// Sequence number drawn when the action ended
    pub end_sequence_no: i32,
}

/// A finished web-request trace to serialise
///
/// Negative byte counts and response codes mean "unknown" and are omitted
/// from the wire format.
#[derive(Debug, Clone)]
pub struct WebRequestData {
    /// Traced URL; doubles as the record name
    pub url: String,
    /// Wall-clock start time in milliseconds
    pub start_time: i64,
    /// Wall-clock end time in milliseconds
    pub end_time: i64,
    /// Sequence number drawn when the request started
    pub start_sequence_no: i32,
    /// Sequence number drawn when the request ended
    pub end_sequence_no: i32,
    /// Bytes sent, `-1` if unknown
    pub bytes_sent: i64,
    /// Bytes received, `-1` if unknown
    pub bytes_received: i64,
    /// HTTP response code, `-1` if unknown
    pub response_code: i32,
}

impl Default for WebRequestData {
    fn default() -> Self {
        Self {
            url: String::new(),
            start_time: 0,
            end_time: 0,
            start_sequence_no: 0,
            end_sequence_no: 0,
            bytes_sent: -1,
            bytes_received: -1,
            response_code: -1,
        }
    }
}
