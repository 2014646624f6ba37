//! Steady-state flushing
//!
//! Each tick: evict, flush finished sessions, flush open sessions when the
//! open-session interval elapsed, then react to whatever server
//! configuration the responses carried.

use std::time::Duration;

use tracing::debug;

use vantage_protocol::StatusResponse;

use crate::context::SendingContext;
use crate::states::SendingState;

/// Pause between ticks
const TICK_SLEEP: Duration = Duration::from_secs(1);

pub(crate) fn execute(context: &SendingContext) -> SendingState {
    context.sleep(TICK_SLEEP);
    if context.is_shutdown_requested() {
        return SendingState::CaptureOn;
    }

    context.evict_cache();

    let finished_response = send_finished_sessions(context);
    let open_response = send_open_sessions(context);

    if let Some(response) = open_response.or(finished_response) {
        if !response.is_erroneous() {
            context.handle_status_response(&response);
            if !context.is_capture_on() {
                debug!("collector turned capture off");
                return SendingState::CaptureOff;
            }
        }
    }

    SendingState::CaptureOn
}

/// Transmit every finished session once; successfully delivered (or
/// undeliverable) sessions leave the registry. A transport failure stops
/// the pass, the rolled-back data is retried next tick.
fn send_finished_sessions(context: &SendingContext) -> Option<StatusResponse> {
    let mut last_response = None;

    for session in context.finished_sessions() {
        if !session.is_data_sending_allowed() || session.beacon().is_empty() {
            context.remove_session(&session);
            session.beacon().clear_data();
            continue;
        }

        match session.beacon().send(context.http_provider(), None) {
            Some(response) if !response.is_erroneous() => {
                last_response = Some(response);
                context.remove_session(&session);
                session.beacon().clear_data();
            }
            _ => break,
        }
    }

    last_response
}

/// Flush open sessions when the open-session interval elapsed.
fn send_open_sessions(context: &SendingContext) -> Option<StatusResponse> {
    let now = context.current_timestamp();
    let send_interval = context.server_config().send_interval_ms();
    if now <= context.last_open_session_send_time() + send_interval {
        return None;
    }

    let mut last_response = None;
    for session in context.open_sessions() {
        if !session.is_data_sending_allowed() {
            continue;
        }
        if let Some(response) = session.beacon().send(context.http_provider(), None) {
            last_response = Some(response);
        }
    }
    context.set_last_open_session_send_time(now);

    last_response
}
