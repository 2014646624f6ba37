//! Vantage Providers - Platform capabilities behind narrow traits
//!
//! The beacon assembler and the sending machinery consume these as
//! `Arc<dyn Trait>`, which keeps the core testable (fixed clocks, seeded
//! session counters) and free of platform assumptions:
//!
//! - [`TimingProvider`] - wall-clock milliseconds
//! - [`ThreadIdProvider`] - a stable per-thread identifier
//! - [`SessionIdProvider`] - the session-number counter
//! - [`RandomNumberGenerator`] - randomness for anonymous visitor ids
//!
//! Default implementations for real hosts live next to each trait.

mod random;
mod session_id;
mod thread_id;
mod timing;

pub use random::{DefaultRandomNumberGenerator, RandomNumberGenerator};
pub use session_id::{DefaultSessionIdProvider, SessionIdProvider};
pub use thread_id::{DefaultThreadIdProvider, ThreadIdProvider};
pub use timing::{DefaultTimingProvider, FixedTimingProvider, TimingProvider};
