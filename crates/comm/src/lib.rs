//! Vantage Comm - Beacon transmission machinery
//!
//! A dedicated sender thread drives an explicit state machine:
//!
//! ```text
//! Init ──capture on──▶ CaptureOn ◀──────────┐
//!   │                      │ capture off     │ capture on
//!   │ capture off          ▼                 │
//!   └────────────────▶ CaptureOff ───────────┘
//!
//! shutdown: Init/CaptureOff ▶ Terminal,
//!           CaptureOn ▶ FlushSessions ▶ Terminal
//! ```
//!
//! Producers only register sessions and append to the beacon cache; all
//! network traffic happens on the sender thread. Shutdown is cooperative:
//! [`SendingContext::request_shutdown`] interrupts any pending sleep, and
//! the current state decides where to go next, so a capturing agent gets
//! one final flush before the thread exits.

mod context;
mod requests;
mod sender;
mod session;
mod states;

pub use context::SendingContext;
pub use sender::BeaconSender;
pub use session::SessionWrapper;
pub use states::SendingState;
