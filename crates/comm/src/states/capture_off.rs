//! Capture denied
//!
//! While the collector denies capturing, sessions buffer nothing (their
//! capture flag is off and leftovers are cleared) and the agent re-polls
//! the collector at a long interval, waiting for the flag to flip back.

use std::time::Duration;

use tracing::debug;

use crate::context::SendingContext;
use crate::requests;
use crate::states::SendingState;

/// How often the collector is asked again
const STATUS_CHECK_INTERVAL_MS: i64 = 2 * 60 * 60 * 1000;

const STATUS_REQUEST_RETRIES: u32 = 5;
const INITIAL_RETRY_SLEEP: Duration = Duration::from_secs(1);

pub(crate) fn execute(context: &SendingContext) -> SendingState {
    context.disable_capture_and_clear_sessions();

    let now = context.current_timestamp();
    let remaining_ms = STATUS_CHECK_INTERVAL_MS - (now - context.last_status_check_time());
    if remaining_ms > 0 && !context.is_shutdown_requested() {
        context.sleep(Duration::from_millis(remaining_ms as u64));
    }
    if context.is_shutdown_requested() {
        return SendingState::CaptureOff;
    }

    let response =
        requests::send_status_request(context, STATUS_REQUEST_RETRIES, INITIAL_RETRY_SLEEP);
    context.set_last_status_check_time(context.current_timestamp());

    if let Some(response) = response {
        if !response.is_erroneous() {
            context.handle_status_response(&response);
            if context.is_capture_on() {
                debug!("collector turned capture back on");
                return SendingState::CaptureOn;
            }
        }
    }

    SendingState::CaptureOff
}
