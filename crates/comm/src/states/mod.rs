//! The sending state machine
//!
//! States are a plain enum; all behaviour lives in the per-state `execute`
//! functions dispatched below. Transitions only ever happen through
//! [`execute`]: a state returns its successor, and a pending shutdown
//! request overrides that with the state's declared shutdown successor.

mod capture_off;
mod capture_on;
mod flush_sessions;
mod init;
mod terminal;

use tracing::debug;

use crate::context::SendingContext;

/// State of the beacon sending machinery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendingState {
    /// Handshaking with the collector until it answers
    Init,
    /// Steady-state flushing of finished and open sessions
    CaptureOn,
    /// Capture denied by the collector; polling for a change of mind
    CaptureOff,
    /// Final flush of everything buffered before terminating
    FlushSessions,
    /// Sender thread is done
    Terminal,
}

impl SendingState {
    /// Whether the worker loop stops after this state
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Terminal)
    }

    /// Successor when a shutdown request arrives in this state.
    ///
    /// Only a capturing agent flushes on the way out; everything else goes
    /// straight to [`SendingState::Terminal`].
    pub fn shutdown_state(self) -> SendingState {
        match self {
            Self::CaptureOn => Self::FlushSessions,
            Self::Init | Self::CaptureOff | Self::FlushSessions | Self::Terminal => Self::Terminal,
        }
    }
}

/// Run one step of the state machine and return the next state.
pub(crate) fn execute(state: SendingState, context: &SendingContext) -> SendingState {
    let mut next = match state {
        SendingState::Init => init::execute(context),
        SendingState::CaptureOn => capture_on::execute(context),
        SendingState::CaptureOff => capture_off::execute(context),
        SendingState::FlushSessions => flush_sessions::execute(context),
        SendingState::Terminal => terminal::execute(context),
    };

    if context.is_shutdown_requested() {
        next = state.shutdown_state();
    }
    if next != state {
        debug!(from = ?state, to = ?next, "sending state changed");
    }
    next
}
