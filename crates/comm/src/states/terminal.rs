//! Terminal state

use crate::context::SendingContext;
use crate::states::SendingState;

pub(crate) fn execute(context: &SendingContext) -> SendingState {
    // latch the flag so producers and the worker loop all see the end
    context.request_shutdown();
    SendingState::Terminal
}
