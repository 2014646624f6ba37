//! Cache eviction
//!
//! Runs on the sender thread between ticks. Nothing happens until the cache
//! crosses its upper bound; then age-expired records go first, and if that
//! is not enough the oldest records are taken from every key round-robin
//! until the cache is back under the lower bound. Records staged for an
//! in-flight transmission are never touched.

use std::sync::Arc;

use tracing::{debug, warn};

use vantage_config::CacheConfig;
use vantage_providers::TimingProvider;

use crate::cache::BeaconCache;

/// Enforces the configured cache bounds
pub struct CacheEvictor {
    cache: Arc<BeaconCache>,
    config: CacheConfig,
    timing: Arc<dyn TimingProvider>,
}

impl CacheEvictor {
    pub fn new(cache: Arc<BeaconCache>, config: CacheConfig, timing: Arc<dyn TimingProvider>) -> Self {
        Self {
            cache,
            config,
            timing,
        }
    }

    /// One eviction pass; cheap when the cache is under its upper bound.
    pub fn execute(&self) {
        if self.cache.size_bytes() <= self.config.upper_bound_bytes {
            return;
        }
        self.evict_expired_records();
        if self.cache.size_bytes() > self.config.lower_bound_bytes {
            self.evict_oldest_records();
        }
    }

    fn evict_expired_records(&self) {
        let min_timestamp_ms = self.timing.timestamp_ms() - self.config.max_record_age_ms;
        let mut removed = 0;
        for key in self.cache.beacon_keys() {
            removed += self.cache.evict_records_by_age(key, min_timestamp_ms);
        }
        if removed > 0 {
            debug!(removed, "evicted expired beacon records");
        }
    }

    fn evict_oldest_records(&self) {
        let mut removed = 0;
        while self.cache.size_bytes() > self.config.lower_bound_bytes {
            let mut progressed = false;
            for key in self.cache.beacon_keys() {
                if self.cache.size_bytes() <= self.config.lower_bound_bytes {
                    break;
                }
                let keep = self.cache.num_records(key).saturating_sub(1);
                if self.cache.evict_records_by_number(key, keep) > 0 {
                    removed += 1;
                    progressed = true;
                }
            }
            if !progressed {
                break;
            }
        }
        if removed > 0 {
            warn!(
                removed,
                cache_size_bytes = self.cache.size_bytes(),
                "beacon cache exceeded its bounds, evicted oldest records"
            );
        }
    }
}
