//! Beacon cache bounds
//!
//! Controls how much telemetry may pile up in memory when the collector is
//! slow or unreachable.

use serde::Deserialize;

const DEFAULT_MAX_RECORD_AGE_MS: i64 = 105 * 60 * 1000;
const DEFAULT_LOWER_BOUND_BYTES: u64 = 80 * 1024 * 1024;
const DEFAULT_UPPER_BOUND_BYTES: u64 = 100 * 1024 * 1024;

/// Bounds for the in-memory beacon cache
///
/// # Example
///
/// ```toml
/// [cache]
/// max-record-age-ms = 3600000
/// upper-bound-bytes = 10485760
/// lower-bound-bytes = 8388608
/// ```
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CacheConfig {
    /// Records older than this are evicted under memory pressure
    /// Default: 105 minutes
    pub max_record_age_ms: i64,

    /// Eviction stops once the cache shrinks below this size
    /// Default: 80 MB
    pub lower_bound_bytes: u64,

    /// Eviction starts once the cache grows beyond this size
    /// Default: 100 MB
    pub upper_bound_bytes: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_record_age_ms: DEFAULT_MAX_RECORD_AGE_MS,
            lower_bound_bytes: DEFAULT_LOWER_BOUND_BYTES,
            upper_bound_bytes: DEFAULT_UPPER_BOUND_BYTES,
        }
    }
}
