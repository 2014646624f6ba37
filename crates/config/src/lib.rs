//! Vantage Configuration
//!
//! Configuration for the monitoring agent comes from three places:
//!
//! - Host-supplied at boot: [`AppConfig`] (application identity and device
//!   facts), [`PrivacyConfig`] (what the user consented to) and
//!   [`CacheConfig`] (beacon cache bounds). The latter two deserialize from
//!   TOML with sensible defaults.
//! - Collector-supplied at runtime: [`ServerConfig`], rebuilt whole from the
//!   attributes of each status response and swapped atomically.
//! - The composite [`BeaconConfig`] ties the three together and owns the
//!   mutable server-config slot plus its update callback.

mod app;
mod beacon;
mod cache;
mod privacy;
mod server;

pub use app::AppConfig;
pub use beacon::{BeaconConfig, ServerConfigUpdateCallback};
pub use cache::CacheConfig;
pub use privacy::{CrashReportingLevel, DataCollectionLevel, PrivacyConfig};
pub use server::ServerConfig;
