//! Initial collector handshake
//!
//! Polls the collector for a server configuration. One round is a bounded
//! retry with doubling sleeps; after a failed round the state waits an
//! escalating re-init delay and starts over, until the collector answers
//! or shutdown is requested.

use std::time::Duration;

use tracing::debug;

use crate::context::SendingContext;
use crate::requests;
use crate::states::SendingState;

const MAX_INITIAL_STATUS_REQUEST_RETRIES: u32 = 5;
const INITIAL_RETRY_SLEEP: Duration = Duration::from_secs(1);

/// Delays between handshake rounds; the last entry repeats
const REINIT_DELAYS: [Duration; 5] = [
    Duration::from_secs(60),
    Duration::from_secs(5 * 60),
    Duration::from_secs(15 * 60),
    Duration::from_secs(60 * 60),
    Duration::from_secs(2 * 60 * 60),
];

pub(crate) fn execute(context: &SendingContext) -> SendingState {
    let mut reinit_delay_index = 0;

    loop {
        if context.is_shutdown_requested() {
            return SendingState::Terminal;
        }

        let response = requests::send_status_request(
            context,
            MAX_INITIAL_STATUS_REQUEST_RETRIES,
            INITIAL_RETRY_SLEEP,
        );

        match response {
            Some(response) if !response.is_erroneous() => {
                context.handle_status_response(&response);
                let now = context.current_timestamp();
                context.set_last_open_session_send_time(now);
                context.set_last_status_check_time(now);

                return if context.is_capture_on() {
                    debug!("collector handshake done, capture on");
                    SendingState::CaptureOn
                } else {
                    debug!("collector handshake done, capture off");
                    SendingState::CaptureOff
                };
            }
            _ => {
                context.sleep(REINIT_DELAYS[reinit_delay_index]);
                reinit_delay_index = (reinit_delay_index + 1).min(REINIT_DELAYS.len() - 1);
            }
        }
    }
}
