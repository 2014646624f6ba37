//! Test support - scripted HTTP clients
//!
//! Shipped as a public module so that every crate driving the transport
//! contracts (beacon send, sending states) can test against the same
//! scripted collector instead of a live endpoint.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::{
    AdditionalQueryParams, HttpClient, HttpClientConfig, HttpClientProvider, ProtocolError,
    Result, StatusResponse,
};

/// One request observed by a scripted client
#[derive(Debug, Clone)]
pub enum RecordedRequest {
    /// A status request
    Status,
    /// A beacon request with the forwarded client IP and raw body
    Beacon { client_ip: String, body: Vec<u8> },
}

#[derive(Default)]
struct Script {
    responses: Mutex<VecDeque<Result<StatusResponse>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl Script {
    fn next_response(&self) -> Result<StatusResponse> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(StatusResponse::with_status(200)))
    }
}

/// Scripted [`HttpClientProvider`].
///
/// Responses are queued ahead of time and consumed in order across all
/// clients the provider creates; once the queue is empty every request
/// answers `200` with no attributes. All requests are recorded.
#[derive(Clone, Default)]
pub struct ScriptedHttpClientProvider {
    script: Arc<Script>,
}

impl ScriptedHttpClientProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next response (ok or transport error)
    pub fn push_response(&self, response: Result<StatusResponse>) {
        self.script.responses.lock().unwrap().push_back(response);
    }

    /// Queue a plain response with the given status code
    pub fn push_status(&self, status_code: u16) {
        self.push_response(Ok(StatusResponse::with_status(status_code)));
    }

    /// Queue a transport failure
    pub fn push_transport_error(&self) {
        self.push_response(Err(ProtocolError::Transport("scripted failure".to_string())));
    }

    /// All requests observed so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script.requests.lock().unwrap().clone()
    }

    /// Beacon request bodies observed so far, decoded as UTF-8
    pub fn beacon_bodies(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter_map(|request| match request {
                RecordedRequest::Beacon { body, .. } => {
                    Some(String::from_utf8(body).expect("beacon body is UTF-8"))
                }
                RecordedRequest::Status => None,
            })
            .collect()
    }

    /// Number of status requests observed so far
    pub fn status_request_count(&self) -> usize {
        self.requests()
            .iter()
            .filter(|request| matches!(request, RecordedRequest::Status))
            .count()
    }
}

impl HttpClientProvider for ScriptedHttpClientProvider {
    fn create_client(&self, _config: &HttpClientConfig) -> Box<dyn HttpClient> {
        Box::new(ScriptedHttpClient {
            script: Arc::clone(&self.script),
        })
    }
}

/// Client handed out by [`ScriptedHttpClientProvider`]
pub struct ScriptedHttpClient {
    script: Arc<Script>,
}

impl HttpClient for ScriptedHttpClient {
    fn send_status_request(
        &self,
        _params: Option<&AdditionalQueryParams>,
    ) -> Result<StatusResponse> {
        self.script
            .requests
            .lock()
            .unwrap()
            .push(RecordedRequest::Status);
        self.script.next_response()
    }

    fn send_beacon_request(
        &self,
        client_ip: &str,
        body: &[u8],
        _params: Option<&AdditionalQueryParams>,
    ) -> Result<StatusResponse> {
        self.script
            .requests
            .lock()
            .unwrap()
            .push(RecordedRequest::Beacon {
                client_ip: client_ip.to_string(),
                body: body.to_vec(),
            });
        self.script.next_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_script_answers_200() {
        let provider = ScriptedHttpClientProvider::new();
        let client = provider.create_client(&HttpClientConfig::new("http://x", 1, "app"));
        let response = client.send_status_request(None).unwrap();
        assert_eq!(response.status_code(), 200);
    }

    #[test]
    fn test_responses_are_consumed_in_order_across_clients() {
        let provider = ScriptedHttpClientProvider::new();
        provider.push_status(500);
        provider.push_transport_error();

        let config = HttpClientConfig::new("http://x", 1, "app");
        let first = provider.create_client(&config);
        assert_eq!(first.send_status_request(None).unwrap().status_code(), 500);

        let second = provider.create_client(&config);
        assert!(second.send_status_request(None).is_err());
        assert_eq!(second.send_status_request(None).unwrap().status_code(), 200);
    }

    #[test]
    fn test_beacon_requests_are_recorded() {
        let provider = ScriptedHttpClientProvider::new();
        let client = provider.create_client(&HttpClientConfig::new("http://x", 1, "app"));
        client
            .send_beacon_request("127.0.0.1", b"vv=3&va=test", None)
            .unwrap();

        let bodies = provider.beacon_bodies();
        assert_eq!(bodies, vec!["vv=3&va=test".to_string()]);
        match &provider.requests()[0] {
            RecordedRequest::Beacon { client_ip, .. } => assert_eq!(client_ip, "127.0.0.1"),
            other => panic!("unexpected request {other:?}"),
        }
    }
}
