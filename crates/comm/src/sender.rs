//! The dedicated sender thread

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::context::SendingContext;
use crate::states::{self, SendingState};

/// Owns the sender thread and drives the state machine on it.
///
/// Producers keep a handle to the shared [`SendingContext`] for session
/// registration; all network traffic happens on this thread.
pub struct BeaconSender {
    context: Arc<SendingContext>,
    handle: Option<JoinHandle<()>>,
}

impl BeaconSender {
    pub fn new(context: Arc<SendingContext>) -> Self {
        Self {
            context,
            handle: None,
        }
    }

    #[inline]
    pub fn context(&self) -> &Arc<SendingContext> {
        &self.context
    }

    /// Spawn the sender thread; a second call is a no-op.
    pub fn start(&mut self) -> io::Result<()> {
        if self.handle.is_some() {
            return Ok(());
        }

        let context = Arc::clone(&self.context);
        let handle = thread::Builder::new()
            .name("vantage-sender".to_string())
            .spawn(move || {
                debug!("beacon sender started");
                let mut state = SendingState::Init;
                while !state.is_terminal() {
                    state = states::execute(state, &context);
                }
                // run the terminal state once so the shutdown flag latches
                states::execute(state, &context);
                debug!("beacon sender stopped");
            })?;
        self.handle = Some(handle);
        Ok(())
    }

    /// Request shutdown and wait for the thread to finish its final flush.
    pub fn shutdown(&mut self) {
        self.context.request_shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Whether the sender thread is currently running
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}
