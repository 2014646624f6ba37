//! Bounded-retry status requests

use std::time::Duration;

use tracing::debug;

use vantage_protocol::StatusResponse;

use crate::context::SendingContext;

/// Send a status request, retrying up to `max_retries` times with a
/// doubling sleep in between.
///
/// Returns the last response received, which may still be erroneous; `None`
/// means every attempt failed at the transport level.
pub(crate) fn send_status_request(
    context: &SendingContext,
    max_retries: u32,
    initial_retry_sleep: Duration,
) -> Option<StatusResponse> {
    let client = context.create_http_client();
    let mut sleep_duration = initial_retry_sleep;
    let mut last_response = None;

    for retry in 0..=max_retries {
        match client.send_status_request(None) {
            Ok(response) if !response.is_erroneous() => return Some(response),
            Ok(response) => {
                debug!(status = response.status_code(), "status request rejected");
                last_response = Some(response);
            }
            Err(error) => {
                debug!(error = %error, "status request failed");
                last_response = None;
            }
        }

        if retry == max_retries || context.is_shutdown_requested() {
            break;
        }
        context.sleep(sleep_duration);
        sleep_duration *= 2;
    }

    last_response
}
