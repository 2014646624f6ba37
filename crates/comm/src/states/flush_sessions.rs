//! Final flush before termination
//!
//! Runs exactly once, on the way out of a capturing agent. Sessions that
//! never saw a server configuration get capture enabled so their buffered
//! data can still go out; all open sessions are ended; every session gets
//! one transmission attempt, responses are ignored.

use tracing::debug;

use crate::context::SendingContext;
use crate::states::SendingState;

pub(crate) fn execute(context: &SendingContext) -> SendingState {
    for session in context.all_sessions() {
        if !session.beacon().is_server_config_set() {
            session.beacon().enable_capture();
        }
    }

    for session in context.open_sessions() {
        session.end();
    }

    let sessions = context.finished_sessions();
    debug!(sessions = sessions.len(), "flushing all sessions");
    for session in sessions {
        if !session.beacon().is_empty() {
            session.beacon().send(context.http_provider(), None);
        }
        context.remove_session(&session);
        session.beacon().clear_data();
    }

    SendingState::Terminal
}
